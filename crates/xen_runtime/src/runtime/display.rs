//! Value printing and type names.

use hashbrown::HashSet;

use crate::core::object::ManagedObject;
use crate::core::{ObjKind, ObjectId, Value, ValueKind};
use crate::util::format_number;

use super::Runtime;

impl Runtime {
    /// Name reported by `typeof`.
    pub fn type_name(&self, value: Value) -> &'static str {
        match value.as_object() {
            Some(id) => self.heap.try_kind_of(id).map_or(value.type_name(), ObjKind::type_name),
            None => value.type_name(),
        }
    }

    /// Display form of `value`. Strings render as their raw content; a
    /// container that contains itself prints `[...]` or `{...}` at the cycle.
    pub fn display(&self, value: Value) -> String {
        let mut out = String::new();
        let mut visiting = HashSet::new();
        self.write_value(&mut out, value, &mut visiting);
        out
    }

    fn write_value(&self, out: &mut String, value: Value, visiting: &mut HashSet<ObjectId>) {
        match value.kind() {
            ValueKind::Null => out.push_str("null"),
            ValueKind::Bool => out.push_str(if value.as_bool() { "true" } else { "false" }),
            ValueKind::Number => out.push_str(&format_number(value.as_f64())),
            ValueKind::Object => self.write_object(out, value.as_obj_id(), visiting),
        }
    }

    fn write_object(&self, out: &mut String, id: ObjectId, visiting: &mut HashSet<ObjectId>) {
        let Some(object) = self.heap.try_get(id) else {
            out.push_str("<invalid object>");
            return;
        };
        match object {
            ManagedObject::Str(s) => out.push_str(s.as_str()),
            ManagedObject::Function(f) => match f.name.and_then(|n| self.heap.str_content(n)) {
                Some(name) => {
                    out.push_str("<Function ");
                    out.push_str(name);
                    out.push('>');
                }
                None => out.push_str("<script>"),
            },
            ManagedObject::NativeFunction(n) => {
                out.push_str("<Function xstd::");
                out.push_str(&n.name);
                out.push('>');
            }
            ManagedObject::Namespace(ns) => {
                out.push_str("<namespace ");
                out.push_str(ns.name());
                out.push('>');
            }
            ManagedObject::Array(a) => {
                if !visiting.insert(id) {
                    out.push_str("[...]");
                    return;
                }
                out.push('[');
                for (i, &item) in a.as_slice().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_value(out, item, visiting);
                }
                out.push(']');
                visiting.remove(&id);
            }
            ManagedObject::Dict(d) => {
                if !visiting.insert(id) {
                    out.push_str("{...}");
                    return;
                }
                out.push('{');
                for (i, (key, item)) in d.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(self.heap.str_content(key).unwrap_or_default());
                    out.push_str(": ");
                    self.write_value(out, item, visiting);
                }
                out.push('}');
                visiting.remove(&id);
            }
            ManagedObject::Class(c) => {
                out.push_str("<class ");
                out.push_str(self.heap.str_content(c.name).unwrap_or_default());
                out.push('>');
            }
            ManagedObject::Instance(inst) => {
                out.push('<');
                out.push_str(self.class_name(inst.class));
                out.push_str(" instance>");
            }
            ManagedObject::BoundMethod(b) => {
                out.push_str("<bound method ");
                out.push_str(&b.name);
                out.push('>');
            }
            ManagedObject::U8Array(b) => {
                out.push_str("<u8array ");
                out.push_str(itoa::Buffer::new().format(b.len()));
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::Value;
    use crate::core::object::Chunk;
    use crate::{Runtime, RuntimeConfig};

    fn runtime() -> Runtime {
        Runtime::with_config(RuntimeConfig {
            echo_errors: false,
            ..RuntimeConfig::default()
        })
    }

    #[test]
    fn primitives() {
        let rt = runtime();
        assert_eq!(rt.display(Value::NULL), "null");
        assert_eq!(rt.display(Value::TRUE), "true");
        assert_eq!(rt.display(Value::from_f64(3.0)), "3");
        assert_eq!(rt.display(Value::from_f64(2.5)), "2.5");
    }

    #[test]
    fn containers_and_cycles() {
        let mut rt = runtime();
        let a = rt.new_array();
        let s = rt.new_string("x");
        rt.array_mut(a).unwrap().push(Value::from_f64(1.0));
        rt.array_mut(a).unwrap().push(s);
        assert_eq!(rt.display(Value::object(a)), "[1, x]");
        rt.array_mut(a).unwrap().push(Value::object(a));
        assert_eq!(rt.display(Value::object(a)), "[1, x, [...]]");
    }

    #[test]
    fn shared_children_are_not_cycles() {
        let mut rt = runtime();
        let inner = rt.new_array();
        let outer = rt.new_array_from([Value::object(inner), Value::object(inner)]);
        assert_eq!(rt.display(Value::object(outer)), "[[], []]");
    }

    #[test]
    fn functions_and_classes() {
        let mut rt = runtime();
        let script = rt.new_function(None, 0, Chunk::new());
        let named = rt.new_function(Some("area"), 1, Chunk::new());
        let class = rt.define_class("Point");
        let inst = rt.instantiate(class).unwrap();
        assert_eq!(rt.display(Value::object(script)), "<script>");
        assert_eq!(rt.display(Value::object(named)), "<Function area>");
        assert_eq!(rt.display(Value::object(class)), "<class Point>");
        assert_eq!(rt.display(Value::object(inst)), "<Point instance>");
        let sqrt = rt.namespace("math").and_then(|m| rt.get_member(m, "sqrt", crate::MemberAccess::External).ok());
        assert_eq!(sqrt.map(|v| rt.display(v)).as_deref(), Some("<Function xstd::sqrt>"));
    }
}
