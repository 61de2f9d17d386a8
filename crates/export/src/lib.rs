//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod states {
    use std::io::{self, Write};

    use leg_lowthrust::LegNode;

    const HEADER: &str = "node,time_s,x_m,y_m,z_m,vx_m_s,vy_m_s,vz_m_s,mass_kg,thrust_x_n,thrust_y_n,thrust_z_n";

    /// Write the node history CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Serialize one node, matching the header ordering.
    pub fn write_node(writer: &mut dyn Write, index: usize, node: &LegNode) -> io::Result<()> {
        write!(writer, "{}", index)?;
        for value in node.to_array() {
            write!(writer, ",{:e}", value)?;
        }
        writeln!(writer)
    }

    /// Header followed by every node in order.
    pub fn write_nodes(writer: &mut dyn Write, nodes: &[LegNode]) -> io::Result<()> {
        write_header(writer)?;
        for (index, node) in nodes.iter().enumerate() {
            write_node(writer, index, node)?;
        }
        writer.flush()
    }
}

pub mod report {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use leg_lowthrust::{LegNode, Throttle};

    /// JSON sidecar describing one evaluated leg.
    #[derive(Debug, Serialize)]
    pub struct LegReport<'a> {
        pub name: &'a str,
        pub departure_mjd2000: f64,
        pub arrival_mjd2000: f64,
        pub n_seg: usize,
        pub mismatch: [f64; 8],
        pub mismatch_norm: f64,
        pub throttles_con: &'a [f64],
        pub throttles: &'a [Throttle],
        pub nodes: &'a [LegNode],
    }

    impl LegReport<'_> {
        /// True when every mismatch is within `tol` and every throttle constraint holds.
        pub fn feasible(&self, tol: f64) -> bool {
            self.mismatch.iter().all(|m| m.abs() <= tol)
                && self.throttles_con.iter().all(|c| *c <= 0.0)
        }
    }

    /// Euclidean norm of the position, velocity and mass mismatches.
    pub fn state_mismatch_norm(mismatch: &[f64; 8]) -> f64 {
        mismatch[..7].iter().map(|m| m * m).sum::<f64>().sqrt()
    }

    /// Write the report as pretty JSON, creating parent directories as needed.
    pub fn write_report(path: &Path, report: &LegReport<'_>) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, report)?;
        Ok(())
    }
}
