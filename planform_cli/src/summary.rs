//! Console summary of a derived aircraft.

use std::fmt::Write;

use planform_core::{Aircraft, LongitudinalStability};

const RULE: &str = "═══════════════════════════════════════════════";

/// Render the derived geometry, and stability figures if evaluated.
pub fn render(aircraft: &Aircraft, stability: Option<&LongitudinalStability>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_summary(&mut out, aircraft, stability);
    out
}

fn write_summary(
    out: &mut String,
    aircraft: &Aircraft,
    stability: Option<&LongitudinalStability>,
) -> std::fmt::Result {
    let c = &aircraft.components;
    let wing = &c.wing;
    let aileron = &wing.aileron;
    let h_stab = &c.horizontal_stabilizer;
    let v_stab = &c.vertical_stabilizer;

    writeln!(out, "{}", RULE)?;
    writeln!(out, "  AIRCRAFT SUMMARY: {}", aircraft.display_name())?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    let mass = &aircraft.mass_properties;
    writeln!(out, "Mass:")?;
    if let Some(mtow) = mass.mtow_kg {
        writeln!(out, "  MTOW:          {:>9.1} kg", mtow)?;
    }
    if let Some(loading) = mass.wing_loading_kg_per_m2 {
        writeln!(out, "  Wing loading:  {:>9.1} kg/m²", loading)?;
    }
    if let Some(xcg) = mass.xcg_percent_mac {
        writeln!(out, "  cg:            {:>9.1} % MAC", xcg * 100.0)?;
    }
    writeln!(out)?;

    writeln!(out, "Wing (AR {:.2}, λ {:.2}):", wing.aspect_ratio, wing.taper_ratio)?;
    writeln!(out, "  Area:          {:>9.3} m²", wing.area_m2)?;
    writeln!(out, "  Span:          {:>9.3} m", wing.span_m)?;
    writeln!(out, "  Root / tip:    {:>9.3} / {:.3} m", wing.root_chord_m, wing.tip_chord_m)?;
    writeln!(out, "  MAC:           {:>9.3} m", wing.mac_m)?;
    writeln!(
        out,
        "  Aileron:       η {:.2}-{:.2}, chord {:.3} m, Sa/Sw {:.4}",
        aileron.start_eta, aileron.end_eta, aileron.chord, aileron.area_ratio
    )?;
    writeln!(out)?;

    writeln!(out, "Fuselage:")?;
    writeln!(out, "  Fineness:      {:>9.2}", c.fuselage.fineness_ratio)?;
    writeln!(out)?;

    writeln!(out, "Horizontal stabilizer:")?;
    writeln!(out, "  Area:          {:>9.3} m²", h_stab.area_m2)?;
    writeln!(out, "  MAC:           {:>9.3} m", h_stab.mac_m)?;
    writeln!(out, "  V_H:           {:>9.3}", h_stab.volume_coefficient)?;
    writeln!(
        out,
        "  Elevator:      chord {:.3} m, span {:.3} m",
        h_stab.elevator.chord_m, h_stab.elevator.span_m
    )?;
    writeln!(out)?;

    writeln!(out, "Vertical stabilizer:")?;
    writeln!(out, "  Area:          {:>9.3} m²", v_stab.area_m2)?;
    writeln!(out, "  MAC:           {:>9.3} m", v_stab.mac_m)?;
    writeln!(out, "  V_V:           {:>9.4}", v_stab.volume_coefficient)?;
    writeln!(
        out,
        "  Rudder:        span {:.3} m, MAC {:.3} m",
        v_stab.rudder.span_m, v_stab.rudder.mac_m
    )?;

    if let Some(s) = stability {
        writeln!(out)?;
        writeln!(out, "Longitudinal stability (wing):")?;
        writeln!(out, "  C_L_alpha:     {:>9.4} /rad", s.lift_slope_per_rad)?;
        writeln!(out, "  x_cg / x_ac:   {:>9.3} / {:.3} m", s.x_cg_m, s.x_ac_m)?;
        writeln!(out, "  C_m_alpha:     {:>9.4} /rad {}", s.cm_alpha_per_rad, status_icon(s.is_statically_stable()))?;
        writeln!(out, "  Static margin: {:>9.1} % MAC", s.static_margin(wing.mac_m) * 100.0)?;
        if let Some(cm_0) = s.cm_0 {
            writeln!(out, "  C_m0:          {:>9.4}", cm_0)?;
        }
    }

    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn status_icon(stable: bool) -> &'static str {
    if stable { "[STABLE]" } else { "[UNSTABLE]" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planform_core::AircraftSpec;

    const DOCUMENT: &str = r#"
aircraft_name: Trainer
mass_properties: { MTOW_kg: 1000.0, wing_loading_kg_per_m2: 100.0, xcg_percent_mac: 0.2 }
components:
  wing:
    aspect_ratio: 8.0
    taper_ratio: 0.5
    leading_edge_mac_x_m: 2.0
    aileron: { start_eta: 0.6, end_eta: 0.95, aileron_chord_percentage: 0.25 }
    aerodynamics: { cl_alpha_per_rad: 6.28 }
  fuselage: { length_m: 7.0, width_m: 1.1 }
  horizontal_stabilizer:
    span_m: 3.0
    root_chord_m: 0.8
    taper_ratio: 0.6
    tail_arm_m: 4.5
    elevator: { chord_percentage: 0.35, span_percentage: 0.9 }
  vertical_stabilizer:
    span_m: 1.4
    root_chord_m: 1.0
    taper_ratio: 0.6
    tail_arm_m: 4.3
    rudder: { chord_percentage: 0.4, span_percentage: 0.9 }
"#;

    #[test]
    fn test_summary_contents() {
        let spec: AircraftSpec = serde_yaml::from_str(DOCUMENT).unwrap();
        let aircraft = spec.derive().unwrap();
        let stability = aircraft.evaluate_stability().unwrap();

        let text = render(&aircraft, Some(&stability));
        assert!(text.contains("AIRCRAFT SUMMARY: Trainer"));
        assert!(text.contains("10.000 m²"));
        assert!(text.contains("[STABLE]"));
        // cg at 20 % MAC, aerodynamic center at 25 %
        assert!(text.contains("Static margin:       5.0 % MAC"));

        let without = render(&aircraft, None);
        assert!(!without.contains("C_m_alpha"));
    }
}
