// Example: run passes over captured frames and print every transition.
use exposure::{Bounds, ExposureEngine, ExposureEvent, ExposureOptions, FrameSnapshot};

fn main() {
    let mut engine: ExposureEngine<u64, &'static str> = ExposureEngine::new(ExposureOptions::new());
    engine.subscribe(|ev: &ExposureEvent<u64, &'static str>| {
        println!("t={}ms {ev}", ev.timestamp_ms);
    });

    // A 1000px viewport over three 300px cards.
    let mut frame = FrameSnapshot::new(Bounds::vertical(0, 1000))
        .with_item(1, Bounds::vertical(0, 300), "Local council approves budget")
        .with_item(2, Bounds::vertical(300, 600), "Storm warning")
        .with_item(3, Bounds::vertical(800, 1100), "Transfer window roundup");

    engine.run_pass(&frame, 0);

    // Scroll down by 500px.
    frame.scroll_content_by(-500);
    engine.run_pass(&frame, 16);

    // Same geometry again: nothing new to report.
    let batch = engine.run_pass(&frame, 32);
    println!("idle pass events={}", batch.len());
}
