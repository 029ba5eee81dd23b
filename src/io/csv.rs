use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::field::{Component, Field};
use crate::sim::State;

/// Write a field as CSV, one line per matrix row.
pub fn write_field<W: Write>(writer: &mut W, field: &Field) -> io::Result<()> {
    for row in field.row_iter() {
        let line: Vec<String> = row.iter().map(|v| format!("{:.6}", v)).collect();
        writeln!(writer, "{}", line.join(","))?;
    }
    Ok(())
}

/// Write per-frame statistics of both fields.
///
/// Columns: step, time, a_min, a_max, a_mean, b_min, b_max, b_mean
pub fn write_history<W: Write>(writer: &mut W, frames: &[State]) -> io::Result<()> {
    writeln!(writer, "step,time,a_min,a_max,a_mean,b_min,b_max,b_mean")?;

    for s in frames {
        let a = s.stats(Component::A);
        let b = s.stats(Component::B);
        writeln!(
            writer,
            "{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            s.step, s.time,
            a.min, a.max, a.mean,
            b.min, b.max, b.mean,
        )?;
    }

    Ok(())
}

/// Write a field to a CSV file at the given path.
pub fn write_field_file(path: impl AsRef<Path>, field: &Field) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_field(&mut file, field)?;
    file.flush()
}

/// Write frame statistics to a CSV file at the given path.
pub fn write_history_file(path: impl AsRef<Path>, frames: &[State]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_history(&mut file, frames)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_rows_become_lines() {
        let f = Field::from_fn(2, 3, |i, j| (i * 10 + j) as f64 * 0.5);
        let mut buf = Vec::new();
        write_field(&mut buf, &f).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "0.000000,0.500000,1.000000");
        assert_eq!(lines[1], "5.000000,5.500000,6.000000");
    }

    #[test]
    fn history_has_header_and_rows() {
        let mut s0 = State::zeros(2, 2);
        s0.a.fill(1.0);
        let mut s1 = s0.clone();
        s1.step = 10;
        s1.time = 0.01;
        s1.b[(0, 0)] = -2.0;

        let mut buf = Vec::new();
        write_history(&mut buf, &[s0, s1]).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("step,time,"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("0,0.000000,1.000000,1.000000,1.000000,"));
        assert!(lines[2].starts_with("10,0.010000,"));
        assert!(lines[2].ends_with(",-2.000000,0.000000,-0.500000"));
    }
}
