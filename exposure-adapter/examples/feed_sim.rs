use exposure::{Bounds, ExposureSource, RenderedItem};
use exposure_adapter::{Controller, ScrollContainer, ScrollPhase, SharedEventLog};

/// A fake feed: fixed-height cards, rendered with one card of overscan on each side.
struct Feed {
    titles: Vec<String>,
    card_height: i32,
    viewport_height: i32,
    offset: i32,
}

impl ExposureSource<usize, String> for Feed {
    fn viewport_bounds(&self) -> Bounds {
        Bounds::vertical(0, self.viewport_height)
    }

    fn for_each_rendered_item(&self, emit: &mut dyn FnMut(RenderedItem<usize, String>)) {
        let overscan = self.card_height;
        for (i, title) in self.titles.iter().enumerate() {
            let top = i as i32 * self.card_height - self.offset;
            let bottom = top + self.card_height;
            if bottom > -overscan && top < self.viewport_height + overscan {
                emit(RenderedItem::new(i, Bounds::vertical(top, bottom), title.clone()));
            }
        }
    }
}

impl ScrollContainer<usize, String> for Feed {
    fn register(&mut self) {
        println!("feed: scroll callbacks installed");
    }

    fn unregister(&mut self) {
        println!("feed: scroll callbacks removed");
    }
}

fn main() {
    // Example: an adapter forwarding scroll notifications to the controller, with an event log
    // playing the role of an on-screen debug overlay.
    let feed = Feed {
        titles: (0..30).map(|i| format!("Story #{i}: something happened")).collect(),
        card_height: 240,
        viewport_height: 800,
        offset: 0,
    };

    let mut c: Controller<usize, String, Feed> = Controller::default();
    let log = SharedEventLog::with_capacity(8);
    c.subscribe(log.clone());

    c.attach(feed, 0).expect("fresh controller");

    // A fling: many scroll deltas, then the list settles.
    let mut now_ms = 0u64;
    c.on_scroll_state_changed(ScrollPhase::Dragging, now_ms);
    for _ in 0..20 {
        now_ms += 16;
        if let Some(feed) = c.container_mut() {
            feed.offset += 60;
        }
        c.on_scroll(now_ms);
    }
    c.on_scroll_state_changed(ScrollPhase::Idle, now_ms);

    // The screen goes to the background; scrolling restored from saved state is not tracked.
    c.pause().expect("attached");
    if let Some(feed) = c.container_mut() {
        feed.offset = 0;
    }
    c.on_scroll(now_ms + 16);
    let batch = c.resume(now_ms + 1000).expect("attached");
    println!("resume events={}", batch.len());

    println!("stats: {}", log.stats());
    for ev in log.borrow().entries() {
        println!("  t={}ms {ev}", ev.timestamp_ms);
    }

    c.detach();
}
