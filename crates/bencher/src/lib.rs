/// A `Cookie` header used as benchmark input.
#[derive(Debug, Copy, Clone)]
pub struct HeaderCase {
    name: &'static str,
    file_name: &'static str,
    content: &'static str,
}

impl HeaderCase {
    pub const fn new(name: &'static str, file_name: &'static str, content: &'static str) -> Self {
        Self { name, file_name, content }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    /// The header value, without the trailing newline of the resource file.
    pub fn header(&self) -> &'static str {
        self.content.trim_end()
    }

    /// Number of `name=value` pairs in the header.
    pub fn pairs(&self) -> usize {
        self.header().split(';').filter(|pair| pair.contains('=')).count()
    }
}
