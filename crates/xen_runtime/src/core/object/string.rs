/// Interned, immutable string payload.
pub struct XenString {
    text: Box<str>,
    hash: u64,
}

impl XenString {
    pub(crate) fn new(text: Box<str>, hash: u64) -> Self {
        Self { text, hash }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }
}
