//! Example: Tessellate a canvas
//!
//! Builds a relaxed Voronoi diagram and prints cell statistics plus an SVG
//! outline of the cells to stdout.

use voronoi_tessellation::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = TessellationConfigBuilder::new()
        .seed(42)
        .size(850.0, 1100.0)
        .unwrap()
        .point_count(512)
        .relax_iterations(6)
        .unwrap()
        .build()
        .unwrap();

    eprintln!("Configuration:");
    eprintln!("  Seed: {}", config.seed);
    eprintln!("  Size: {} x {}", config.width, config.height);
    eprintln!("  Points: {}", config.point_count);
    eprintln!("  Relax iterations: {}", config.relax_iterations);

    let diagram = Diagram::generate(&config);
    let cells = diagram.cells();

    let avg_neighbors =
        cells.iter().map(|c| c.neighbor_count()).sum::<usize>() as f64 / cells.len() as f64;
    let avg_radius = cells.iter().map(|c| c.inner_circle_radius).sum::<f64>() / cells.len() as f64;

    eprintln!("\nStatistics:");
    eprintln!("  Cells: {}", diagram.cell_count());
    eprintln!("  Average neighbors per cell: {:.2}", avg_neighbors);
    eprintln!("  Average inner radius: {:.2}", avg_radius);
    eprintln!("  Area coverage: {:.6}", diagram.total_area() / diagram.bounds().area());

    let probe = Point::new(config.width * 0.5, config.height * 0.5);
    if let Some(id) = diagram.locate_point(probe) {
        eprintln!("  Cell under canvas center: {} ({} within 2 hops)", id, diagram.find_cells_within_radius(id, 2).len());
    }

    println!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        config.width, config.height
    );
    for cell in cells {
        let points: Vec<String> = cell.points.iter().map(|p| format!("{:.2},{:.2}", p.x, p.y)).collect();
        println!(
            r##"  <polygon points="{}" fill="none" stroke="#1D1934"/>"##,
            points.join(" ")
        );
        println!(
            r##"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="#B33"/>"##,
            cell.centroid.x, cell.centroid.y, cell.inner_circle_radius
        );
    }
    println!("</svg>");
}
