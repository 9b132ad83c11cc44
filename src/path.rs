use crate::value::Value;

/// A single step in a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object field access by name
    ///
    /// # Examples
    /// - `name` -> `Key("name")`
    /// - `owner.login` -> `[Key("owner"), Key("login")]`
    Key(String),

    /// Array element access by index
    ///
    /// Produced for segments that are all digits, e.g. `topics.0`.
    Index(usize),
}

/// A parsed field path into a record, e.g. `owner.login`.
///
/// Paths are written with dot separators (slashes are accepted too) and are
/// validated at construction: an empty path or empty segment is a
/// [`PathError`]. Resolution against a record never fails; a path that does
/// not apply simply resolves to absent (`None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

/// Construction-time path errors.
///
/// Distinct from a path that merely resolves to absent at runtime, which is
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path text was empty
    Empty,
    /// A separator with nothing between, e.g. `owner..login`
    EmptySegment { text: String },
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::Empty => write!(f, "empty field path"),
            PathError::EmptySegment { text } => {
                write!(f, "empty segment in field path '{}'", text)
            }
        }
    }
}

impl std::error::Error for PathError {}

impl Path {
    /// Parse a dotted (or slash-separated) path.
    pub fn parse(text: &str) -> Result<Path, PathError> {
        if text.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        for part in text.split(['.', '/']) {
            if part.is_empty() {
                return Err(PathError::EmptySegment {
                    text: text.to_string(),
                });
            }
            match part.parse::<usize>() {
                Ok(index) => segments.push(Segment::Index(index)),
                Err(_) => segments.push(Segment::Key(part.to_string())),
            }
        }

        Ok(Path { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Navigate the record, returning `None` the first time a segment cannot
    /// be applied (missing key, index out of range, or a scalar in the way).
    pub fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        let mut current = record;
        for segment in &self.segments {
            current = match (current, segment) {
                (Value::Object(map), Segment::Key(key)) => map.get(key)?,
                (Value::Array(arr), Segment::Index(index)) => arr.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match segment {
                Segment::Key(key) => write!(f, "{}", key)?,
                Segment::Index(index) => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}
