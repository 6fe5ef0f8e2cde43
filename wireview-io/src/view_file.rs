//! View file format support
//!
//! A view file describes one orthographic drawing of a model. It is a
//! line-oriented text format:
//!
//! ```text
//! # front view of a cube
//! v 0 0
//! v 10 0
//! l 0 1
//! ```
//!
//! - `v <a> <b>` declares a vertex in the view plane
//! - `l <i> <j>` declares a segment between two previously declared vertices
//!   (0-based indices)
//!
//! Blank lines and lines starting with `#` are ignored. Tokens may be
//! separated by spaces, tabs or commas.

use wireview_core::{Error, Point2d, Result, View, ViewKind};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// File extension used for view files
pub const VIEW_EXTENSION: &str = "view";

/// Read a view file from disk
pub fn read_view<P: AsRef<Path>>(path: P, kind: ViewKind) -> Result<View> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(kind.as_str())
        .to_string();

    let mut parser = ViewParser::new();
    for (index, line) in reader.lines().enumerate() {
        parser.parse_line(&line?, index + 1)?;
    }
    parser.finish(name, kind)
}

/// Parse a view from an in-memory string
pub fn parse_view(name: &str, kind: ViewKind, contents: &str) -> Result<View> {
    let mut parser = ViewParser::new();
    for (index, line) in contents.lines().enumerate() {
        parser.parse_line(line, index + 1)?;
    }
    parser.finish(name.to_string(), kind)
}

/// Write a view to disk in the view file format
pub fn write_view<P: AsRef<Path>>(view: &View, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# {} view '{}'", view.kind, view.name)?;
    for p in view.points() {
        writeln!(writer, "v {} {}", p.x, p.y)?;
    }
    for [i, j] in view.segments() {
        writeln!(writer, "l {} {}", i, j)?;
    }
    writer.flush()?;
    Ok(())
}

/// Incremental line parser that validates segment indices as it goes
struct ViewParser {
    points: Vec<Point2d>,
    segments: Vec<[usize; 2]>,
}

impl ViewParser {
    fn new() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
        }
    }

    fn parse_line(&mut self, line: &str, line_number: usize) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let tokens: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();

        match tokens.as_slice() {
            ["v", a, b] => {
                let a = parse_number(a, line_number)?;
                let b = parse_number(b, line_number)?;
                self.points.push(Point2d::new(a, b));
            }
            ["l", i, j] => {
                let i = parse_index(i, line_number)?;
                let j = parse_index(j, line_number)?;
                for index in [i, j] {
                    if index >= self.points.len() {
                        return Err(Error::InvalidData(format!(
                            "line {}: segment references vertex {} but only {} declared",
                            line_number,
                            index,
                            self.points.len()
                        )));
                    }
                }
                if i == j {
                    return Err(Error::InvalidData(format!(
                        "line {}: segment joins vertex {} to itself",
                        line_number, i
                    )));
                }
                self.segments.push([i, j]);
            }
            _ => {
                return Err(Error::InvalidData(format!(
                    "line {}: unrecognized entry '{}'",
                    line_number, line
                )));
            }
        }
        Ok(())
    }

    fn finish(self, name: String, kind: ViewKind) -> Result<View> {
        View::new(name, kind, self.points, self.segments)
    }
}

fn parse_number(token: &str, line_number: usize) -> Result<f64> {
    let value: f64 = token.parse().map_err(|_| {
        Error::InvalidData(format!("line {}: invalid coordinate '{}'", line_number, token))
    })?;
    if !value.is_finite() {
        return Err(Error::InvalidData(format!(
            "line {}: coordinate '{}' is not finite",
            line_number, token
        )));
    }
    Ok(value)
}

fn parse_index(token: &str, line_number: usize) -> Result<usize> {
    token.parse().map_err(|_| {
        Error::InvalidData(format!("line {}: invalid vertex index '{}'", line_number, token))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "\
# a unit square
v 0 0
v 1 0
v 1 1
v 0 1

l 0 1
l 1 2
l 2 3
l 3 0
";

    #[test]
    fn test_parse_square() {
        let view = parse_view("top", ViewKind::Top, SQUARE).unwrap();
        assert_eq!(view.len(), 4);
        assert_eq!(view.segments().len(), 4);
        assert_eq!(view.points()[2], Point2d::new(1.0, 1.0));
        assert_eq!(view.segments()[3], [3, 0]);
    }

    #[test]
    fn test_comma_and_tab_separators() {
        let view = parse_view("front", ViewKind::Front, "v 1,2\nv\t3\t4\nl 0,1\n").unwrap();
        assert_eq!(view.points(), &[Point2d::new(1.0, 2.0), Point2d::new(3.0, 4.0)]);
        assert_eq!(view.segments(), &[[0, 1]]);
    }

    #[test]
    fn test_empty_view_is_valid() {
        let view = parse_view("side", ViewKind::Side, "# nothing here\n\n").unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn test_segment_before_vertex_is_rejected() {
        let err = parse_view("top", ViewKind::Top, "v 0 0\nl 0 1\n").unwrap_err();
        assert!(matches!(err, Error::InvalidData(msg) if msg.starts_with("line 2")));
    }

    #[test]
    fn test_self_loop_is_rejected() {
        assert!(parse_view("top", ViewKind::Top, "v 0 0\nl 0 0\n").is_err());
    }

    #[test]
    fn test_bad_coordinate_is_rejected() {
        let err = parse_view("top", ViewKind::Top, "v 0 zero\n").unwrap_err();
        assert!(err.to_string().contains("invalid coordinate"));
        assert!(parse_view("top", ViewKind::Top, "v 0 NaN\n").is_err());
    }

    #[test]
    fn test_unknown_entry_is_rejected() {
        let err = parse_view("top", ViewKind::Top, "f 0 1 2\n").unwrap_err();
        assert!(err.to_string().contains("unrecognized entry"));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.view");

        let original = parse_view("top", ViewKind::Top, SQUARE).unwrap();
        write_view(&original, &path).unwrap();
        let loaded = read_view(&path, ViewKind::Top).unwrap();

        assert_eq!(loaded.name, "top");
        assert_eq!(loaded.points(), original.points());
        assert_eq!(loaded.segments(), original.segments());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_view(dir.path().join("absent.view"), ViewKind::Front).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
