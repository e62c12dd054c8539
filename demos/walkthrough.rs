//! Floorgraph walkthrough: draws a small floor plan, names a room and
//! steps through the undo history, printing the detected rooms.
//!
//! Usage:
//! ```text
//! cargo run --example walkthrough
//! RUST_LOG=floorgraph=debug cargo run --example walkthrough
//! ```

use floorgraph::command::{
    DrawEdgeCommand, RemoveEdgeCommand, SplitEdgeCommand, UpdateSurfaceCommand,
};
use floorgraph::error::GeometryError;
use floorgraph::math::Point2;
use floorgraph::topology::{EdgeStyle, GraphStore};
use floorgraph::{Editor, FloorgraphError};
use tracing::info;

fn print_rooms(label: &str, graph: &GraphStore) {
    println!("-- {label}: {} room(s)", graph.surface_count());
    for room in graph.surfaces() {
        println!(
            "   #{:<3} {:<12} area {:>9.1}  centroid ({:.1}, {:.1})  walls {}",
            room.id,
            room.name,
            room.area,
            room.centroid.x,
            room.centroid.y,
            room.edge_ids.len()
        );
    }
}

fn draw(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
    let cmd = DrawEdgeCommand::new(
        editor.graph(),
        Point2::new(from.0, from.1),
        Point2::new(to.0, to.1),
    );
    editor.apply(cmd);
}

fn main() -> Result<(), FloorgraphError> {
    // Default: WARN for everything, INFO for floorgraph.
    // Override with RUST_LOG env var (e.g. RUST_LOG=floorgraph=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("walkthrough=info".parse().unwrap_or_default())
        .add_directive("floorgraph=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut editor = Editor::new();

    // Outer walls of a 600 × 400 flat.
    let outline = [(0.0, 0.0), (600.0, 0.0), (600.0, 400.0), (0.0, 400.0)];
    for (&from, &to) in outline.iter().zip(outline.iter().cycle().skip(1)) {
        draw(&mut editor, from, to);
    }
    print_rooms("outline", editor.graph());

    // Interior wall, snapped onto the outline by splitting it first.
    let bottom = editor
        .graph()
        .find_edge_near(&Point2::new(250.0, 0.0), 1.0)
        .ok_or_else(|| GeometryError::Degenerate("no bottom wall".into()))?;
    editor.apply(SplitEdgeCommand::new(
        editor.graph(),
        bottom,
        Point2::new(250.0, 0.0),
    ));
    let top = editor
        .graph()
        .find_edge_near(&Point2::new(250.0, 400.0), 1.0)
        .ok_or_else(|| GeometryError::Degenerate("no top wall".into()))?;
    editor.apply(SplitEdgeCommand::new(
        editor.graph(),
        top,
        Point2::new(250.0, 400.0),
    ));
    let partition = DrawEdgeCommand::new(
        editor.graph(),
        Point2::new(250.0, 0.0),
        Point2::new(250.0, 400.0),
    )
    .with_thickness(5.0)
    .with_style(EdgeStyle::Dashed);
    let partition_id = partition.edge_id();
    editor.apply(partition);
    print_rooms("partitioned", editor.graph());

    // Name the left room.
    let left = editor
        .graph()
        .surfaces()
        .find(|s| s.centroid.x < 250.0)
        .map(|s| s.id)
        .ok_or_else(|| GeometryError::Degenerate("no left room".into()))?;
    editor.apply(UpdateSurfaceCommand::rename(left, "Kitchen"));
    info!(room = %editor.graph().surface(left)?.name, "renamed");
    print_rooms("renamed", editor.graph());

    editor.apply(RemoveEdgeCommand::new(partition_id));
    print_rooms("partition removed", editor.graph());

    while let Some(step) = editor.history().undo_description() {
        editor.undo();
        print_rooms(&format!("undo {step}"), editor.graph());
    }
    while let Some(step) = editor.history().redo_description() {
        editor.redo();
        info!(%step, rooms = editor.graph().surface_count(), "redo");
    }
    print_rooms("redone", editor.graph());

    for issue in editor.graph().validate() {
        println!("issue: {issue}");
    }
    Ok(())
}
