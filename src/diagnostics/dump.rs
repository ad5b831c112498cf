use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::{
    DUMP_COLUMN_WIDTH, DUMP_FORCE_MAGNITUDE_WIDTH, DUMP_PRECISION, DUMP_RADIUS_WIDTH,
};
use crate::core::soa::SimulationState;
use crate::error::Result;

/// Outcome of a diagnostic dump: where the snapshot went and what it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpReport {
    pub step: u64,
    pub particle_index: usize,
    pub contact_count: usize,
    pub path: PathBuf,
}

/// File name of the snapshot of `particle_index` at `step`.
pub fn dump_file_name(step: u64, particle_index: usize) -> String {
    format!("step_{step}_part_{particle_index}")
}

/// Formats `value` with `precision` significant digits in general notation,
/// switching to exponent form for very small or large magnitudes.
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn number(value: f64, width: usize) -> String {
    format!("{:>width$}", format_general(value, DUMP_PRECISION), width = width)
}

/// Renders the fixed-width snapshot of one particle plus the contact list.
pub fn render_dump(step: u64, particle_index: usize, state: &SimulationState) -> Result<String> {
    let snapshot = state.snapshot(particle_index)?;
    let w = DUMP_COLUMN_WIDTH;
    let mut out = String::new();

    // `write!` into a String cannot fail.
    let _ = writeln!(out, "SIMULATION STEP: {step} PARTICLE: {particle_index}");

    let _ = write!(out, "{:>w$}{:>w$}", "x_coor", "y_coor");
    let _ = write!(out, "{:>r$}", "radius", r = DUMP_RADIUS_WIDTH);
    let _ = write!(out, "{:>w$}{:>w$}{:>w$}", "mass", "kn", "ks");
    let _ = write!(out, "{:>f$}{:>f$}", "norm_f", "tang_f", f = DUMP_FORCE_MAGNITUDE_WIDTH);
    for header in [
        "forc_x", "forc_y", "accel_x", "accel_y", "vel_x", "vel_y", "disp_x", "disp_y",
    ] {
        let _ = write!(out, "{header:>w$}");
    }
    out.push('\n');

    out.push_str(&number(snapshot.particle.position.x, w));
    out.push_str(&number(snapshot.particle.position.y, w));
    out.push_str(&number(snapshot.particle.radius, DUMP_RADIUS_WIDTH));
    out.push_str(&number(snapshot.properties.mass, w));
    out.push_str(&number(snapshot.properties.kn, w));
    out.push_str(&number(snapshot.properties.ks, w));
    out.push_str(&number(snapshot.normal_force, DUMP_FORCE_MAGNITUDE_WIDTH));
    out.push_str(&number(snapshot.tangential_force, DUMP_FORCE_MAGNITUDE_WIDTH));
    for vector in [
        snapshot.force,
        snapshot.acceleration,
        snapshot.velocity,
        snapshot.displacement,
    ] {
        out.push_str(&number(vector.x, w));
        out.push_str(&number(vector.y, w));
    }
    out.push('\n');

    out.push_str("\nCONTACTS\n");
    let _ = writeln!(out, "{:>w$}{:>w$}{:>w$}", "p1_idx", "p2_idx", "overlap");
    for contact in state.contacts() {
        let _ = writeln!(
            out,
            "{:>w$}{:>w$}{}",
            contact.p1_idx,
            contact.p2_idx,
            number(contact.overlap, w)
        );
    }

    Ok(out)
}

/// Writes the snapshot of `particle_index` to `<folder>/step_<step>_part_<index>`.
///
/// The folder is created when missing. The caller is expected to stop the
/// simulation afterwards; this function only records the state.
pub fn write_debug_information(
    step: u64,
    particle_index: usize,
    state: &SimulationState,
    folder: &Path,
) -> Result<DumpReport> {
    let contents = render_dump(step, particle_index, state)?;
    fs::create_dir_all(folder)?;
    let path = folder.join(dump_file_name(step, particle_index));
    fs::write(&path, contents)?;

    info!(
        "diagnostic dump of particle {particle_index} at step {step} written to {}",
        path.display()
    );

    Ok(DumpReport {
        step,
        particle_index,
        contact_count: state.contacts().len(),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_format_uses_significant_digits() {
        assert_eq!(format_general(100.0, 4), "100");
        assert_eq!(format_general(0.111125, 4), "0.1111");
        assert_eq!(format_general(2.0999967, 4), "2.1");
        assert_eq!(format_general(-34.2779, 4), "-34.28");
        assert_eq!(format_general(-1045.4231, 4), "-1045");
        assert_eq!(format_general(0.0, 4), "0");
    }

    #[test]
    fn general_format_switches_to_exponent() {
        assert_eq!(format_general(12345.6, 4), "1.235e+04");
        assert_eq!(format_general(0.000015, 4), "1.5e-05");
        assert_eq!(format_general(-0.000033, 4), "-3.3e-05");
        assert_eq!(format_general(0.0001, 4), "0.0001");
    }

    #[test]
    fn non_finite_values_are_spelled_out() {
        assert_eq!(format_general(f64::NAN, 4), "nan");
        assert_eq!(format_general(f64::NEG_INFINITY, 4), "-inf");
    }

    #[test]
    fn dump_file_name_encodes_step_and_particle() {
        assert_eq!(dump_file_name(42, 7), "step_42_part_7");
    }
}
