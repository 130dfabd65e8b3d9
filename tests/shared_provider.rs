//! The process-wide landmark provider.
//!
//! Kept in its own test binary: the global handle lives for the whole process.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::DynamicImage;
use tailor_measure::{
    BoxedProvider, DetectorOutput, Error, LandmarkProvider, MeasurementEngine, NoPersonProvider,
    SharedProvider,
};

#[test]
fn provider_is_initialized_once_and_shared() {
    assert!(SharedProvider::get().is_none());

    // A failed initialization leaves the slot empty.
    let failed = SharedProvider::get_or_try_init(|| Err(Error::Provider("model missing".into())));
    assert!(matches!(failed, Err(Error::Provider(_))));
    assert!(SharedProvider::get().is_none());

    let inits = Arc::new(AtomicUsize::new(0));
    let handles: Vec<&'static SharedProvider> = std::thread::scope(|s| {
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let inits = Arc::clone(&inits);
                s.spawn(move || {
                    SharedProvider::get_or_try_init(move || {
                        inits.fetch_add(1, Ordering::SeqCst);
                        Ok(Box::new(NoPersonProvider) as BoxedProvider)
                    })
                    .unwrap()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert_eq!(inits.load(Ordering::SeqCst), 1);
    let first = handles[0];
    assert!(handles.iter().all(|h| std::ptr::eq(*h, first)));
    assert!(std::ptr::eq(SharedProvider::get().unwrap(), first));

    // Later initializers are ignored.
    let again = SharedProvider::get_or_try_init(|| panic!("initializer must not run twice")).unwrap();
    assert!(std::ptr::eq(again, first));

    let mut provider = first;
    let output: DetectorOutput =
        LandmarkProvider::detect(&mut provider, &DynamicImage::new_rgb8(10, 10)).unwrap();
    assert!(!output.detected);

    let engine = MeasurementEngine::default();
    let result = engine
        .measure_detection(&output.to_detection().unwrap(), 165.0, "Standard")
        .unwrap();
    assert_eq!(result.measurements.thobe_length, 132.0);
}
