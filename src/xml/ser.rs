//! XML serialization.
//!
//! Elements are written depth-first with the same indentation scheme as the
//! JSON emitter. Attribute values and text are written verbatim, and the
//! output ends with the root's closing line.

use super::element::Element;
use crate::WriteOptions;

pub struct Emitter {
    output: Vec<u8>,
    options: WriteOptions,
}

impl Emitter {
    pub fn new(options: &WriteOptions) -> Self {
        Emitter {
            output: Vec::with_capacity(256),
            options: options.clone(),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.output
    }

    pub fn emit_document(&mut self, root: &Element) {
        self.emit(root, 1);
    }

    /// Writes `element` with its tags at `depth - 1` and its text at `depth`.
    fn emit(&mut self, element: &Element, depth: usize) {
        self.options.indent.write(&mut self.output, depth - 1);
        self.output.push(b'<');
        self.output.extend_from_slice(element.name());
        for attribute in element.attributes() {
            self.output.push(b' ');
            self.output.extend_from_slice(attribute.key());
            self.output.extend_from_slice(b"=\"");
            self.output.extend_from_slice(attribute.value());
            self.output.push(b'"');
        }

        if element.is_empty() {
            self.output.extend_from_slice(b"/>\n");
            return;
        }
        self.output.extend_from_slice(b">\n");

        if !element.text().is_empty() {
            self.options.indent.write(&mut self.output, depth);
            self.output.extend_from_slice(element.text());
            self.output.push(b'\n');
        }
        for child in element.children() {
            self.emit(child.value(), depth + 1);
        }

        self.options.indent.write(&mut self.output, depth - 1);
        self.output.extend_from_slice(b"</");
        self.output.extend_from_slice(element.name());
        self.output.extend_from_slice(b">\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Indent;

    fn emit(element: &Element, options: &WriteOptions) -> String {
        let mut emitter = Emitter::new(options);
        emitter.emit_document(element);
        String::from_utf8(emitter.into_inner()).unwrap()
    }

    #[test]
    fn test_self_closing_with_attribute() {
        let mut leaf = Element::named("leaf");
        leaf.add_attribute("id", "7");
        assert_eq!(emit(&leaf, &WriteOptions::default()), "<leaf id=\"7\"/>\n");
    }

    #[test]
    fn test_nested_layout() {
        let mut child = Element::named("child");
        child.set_text("hi");
        let mut root = Element::named("root");
        root.add_child(child);
        assert_eq!(
            emit(&root, &WriteOptions::default()),
            "<root>\n\t<child>\n\t\thi\n\t</child>\n</root>\n"
        );
    }

    #[test]
    fn test_text_before_children() {
        let mut root = Element::named("a");
        root.set_text("body");
        root.add_child(Element::named("b"));
        let options = WriteOptions::new().with_indent(Indent::Spaces(2));
        assert_eq!(emit(&root, &options), "<a>\n  body\n  <b/>\n</a>\n");
    }

    #[test]
    fn test_raw_bytes_written_verbatim() {
        let mut root = Element::named("a");
        root.add_attribute("k", b"\xff");
        root.set_text(b"caf\xe9");
        let mut emitter = Emitter::new(&WriteOptions::default());
        emitter.emit_document(&root);
        assert_eq!(emitter.into_inner(), b"<a k=\"\xff\">\n\tcaf\xe9\n</a>\n");
    }
}
