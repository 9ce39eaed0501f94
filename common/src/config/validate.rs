pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Checks that a probability lies in `[0, 1]`.
pub fn validate_rate(name: &str, rate: f64) -> Result<(), String> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(format!("{} must be between 0 and 1, got {}", name, rate));
    }
    Ok(())
}
