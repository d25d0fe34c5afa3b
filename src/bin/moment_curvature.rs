//! Moment-curvature comparison - two fibers, five ways

use anyhow::Context;
use fiber_section::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Nominal section: 300 x 500 mm rectangle of S355 steel.
    let (width, depth) = (300.0, 500.0);
    let steel = Steel::s355();

    let axial_load = 0.0;
    let target_curvature = 6.4e-5;
    let increments = 5000;

    println!("=== Fiber Section: Moment-Curvature Comparison ===\n");
    println!(
        "Section {width} x {depth}, fy = {}, E = {}, b = {}",
        steel.fy, steel.e, steel.hardening_ratio
    );
    println!(
        "Axial load = {axial_load}, target curvature = {target_curvature:e}, {increments} steps\n"
    );

    let schemes = [
        LayoutScheme::Midpoint,
        LayoutScheme::Gauss,
        LayoutScheme::Lobatto,
        LayoutScheme::Radau,
        LayoutScheme::NewtonCotes,
        LayoutScheme::reference(),
    ];

    // Analytic plastic moment of the rectangle, the yardstick every layout
    // is judged against.
    let plastic_moment = steel.fy * width * depth * depth / 4.0;

    println!(
        "{:<14} {:>8} {:>16} {:>10}",
        "scheme", "fibers", "ultimate moment", "M/Mp"
    );
    for scheme in schemes {
        let section = FiberSection::new(width, depth, steel, scheme)?;
        let fiber_count = section.fibers().len();

        let mut rig = SectionRig::new(section);
        rig.run(
            axial_load,
            target_curvature,
            increments,
            &AnalysisOptions::default(),
        )
        .with_context(|| format!("{} analysis failed", scheme.label()))?;

        let ultimate = rig
            .response()
            .ultimate_moment()
            .context("no steps recorded")?;
        println!(
            "{:<14} {:>8} {:>16.4e} {:>10.4}",
            scheme.label(),
            fiber_count,
            ultimate,
            ultimate / plastic_moment
        );
    }

    println!("\nAnalytic plastic moment Mp = fy*b*d^2/4 = {plastic_moment:.4e}");
    Ok(())
}
