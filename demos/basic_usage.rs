//! Example usage of the Whittaker-Eilers smoother crate

use whittaker_eilers::{smooth, roughness, spacing_from_positions, WhittakerSmoother};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Whittaker-Eilers Smoother Examples ===\n");

    // Create some noisy test data
    let clean_signal: Vec<f64> = (0..24)
        .map(|i| {
            let x = i as f64 * 0.1;
            (2.0 * std::f64::consts::PI * x).sin() + 0.5 * (4.0 * std::f64::consts::PI * x).cos()
        })
        .collect();

    let mut noisy_signal = clean_signal.clone();
    for (i, value) in noisy_signal.iter_mut().enumerate() {
        if i % 3 == 0 {
            *value += 0.3 * (i as f64 % 2.0 - 0.5);
        }
    }

    println!("Original noisy signal:");
    print_signal(&noisy_signal);

    // Example 1: Convenience function, second order penalty
    println!("\n1. Second order smoothing (lambda=2):");
    let smoothed = smooth(&noisy_signal, 2.0, 2, None)?;
    print_signal(&smoothed);

    // Example 2: Reusable smoother, first order penalty
    println!("\n2. First order smoothing (lambda=5):");
    let smoother = WhittakerSmoother::new(5.0, 1)?;
    print_signal(&smoother.smooth(&noisy_signal)?);

    // Example 3: Irregularly sampled data
    println!("\n3. Non-uniform spacing:");
    let positions: Vec<f64> = (0..noisy_signal.len())
        .map(|i| i as f64 + if i % 4 == 0 { 0.5 } else { 0.0 })
        .collect();
    let spacing = spacing_from_positions(&positions)?;
    let irregular = WhittakerSmoother::new(2.0, 2)?.with_spacing(spacing);
    print_signal(&irregular.smooth(&noisy_signal)?);

    // Example 4: Roughness against lambda
    println!("\n4. Roughness (order 2) as lambda grows:");
    for lambda in [0.0, 1.0, 10.0, 100.0, 1000.0] {
        let smoothed = smooth(&noisy_signal, lambda, 2, None)?;
        println!("  lambda={:>7.1}  roughness={:.6}", lambda, roughness(&smoothed, 2)?);
    }

    // Example 5: Dense solve timing
    println!("\n5. Performance test:");
    let large_data: Vec<f64> = (0..1000)
        .map(|i| (i as f64 * 0.01).sin() + 0.1 * (i as f64 * 0.7).cos())
        .collect();

    let start = std::time::Instant::now();
    let _smoothed_large = smooth(&large_data, 100.0, 2, None)?;
    let duration = start.elapsed();
    println!("Processed {} points in {:?}", large_data.len(), duration);

    Ok(())
}

fn print_signal(signal: &[f64]) {
    for (i, &value) in signal.iter().enumerate() {
        print!("{:7.3}", value);
        if (i + 1) % 8 == 0 {
            println!();
        }
    }
    if signal.len() % 8 != 0 {
        println!();
    }
}
