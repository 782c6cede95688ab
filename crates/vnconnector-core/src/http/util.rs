use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that may not appear unescaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encodes a value for use as one segment of a request path.
pub fn encode_path_segment<T: AsRef<str>>(s: T) -> String {
    utf8_percent_encode(s.as_ref(), PATH_SEGMENT).to_string()
}
