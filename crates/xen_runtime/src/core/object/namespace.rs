use indexmap::IndexMap;
use xen_core::Value;

/// Named flat registry of bindings. Insertion order is preserved and a set on
/// an existing name overwrites in place.
pub struct Namespace {
    name: Box<str>,
    entries: IndexMap<Box<str>, Value>,
}

impl Namespace {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.entries.get_mut(name) {
            *slot = value;
        } else {
            self.entries.insert(name.into(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.entries.iter().map(|(k, v)| (&**k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_in_place() {
        let mut ns = Namespace::new("m");
        ns.set("a", Value::from_f64(1.0));
        ns.set("b", Value::from_f64(2.0));
        ns.set("a", Value::from_f64(3.0));
        let names: Vec<_> = ns.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(ns.get("a"), Some(Value::from_f64(3.0)));
        assert_eq!(ns.get("c"), None);
    }
}
