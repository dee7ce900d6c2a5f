// Example: sticky vs re-armed thresholds for an item that dips below 50% without leaving.
use exposure::{ExposureEngine, ExposureOptions, Observation, ThresholdPolicy};

fn main() {
    let fractions = [0.6f32, 0.3, 0.7, 0.0];

    for policy in [ThresholdPolicy::Sticky, ThresholdPolicy::Rearm] {
        let mut engine: ExposureEngine<u32, ()> =
            ExposureEngine::new(ExposureOptions::new().with_threshold_policy(policy));

        let mut kinds = Vec::new();
        for (now_ms, f) in fractions.into_iter().enumerate() {
            let batch = engine.apply_observations([Observation::new(1, f, ())], now_ms as u64);
            kinds.extend(batch.iter().map(|e| e.kind.label()));
        }
        println!("{policy:?}: {kinds:?}");
    }
}
