//! Pure route evaluation and recommendation.

use super::constants::*;
use super::types::{ModeProfile, RouteComparison, RouteMode, RouteOption};
use crate::error::ImpactError;

/// Eco score from a mode's emission rate, penalized for impractically long
/// trips. Always in `MIN_ECO_SCORE..=MAX_ECO_SCORE`.
pub fn eco_score(co2_g_per_km: f64, time_minutes: u64) -> u8 {
    let steps = (co2_g_per_km / SCORE_STEP_G_PER_KM).floor();
    // Saturating float-to-int cast; NaN becomes 0.
    let mut score = MAX_ECO_SCORE.saturating_sub(steps as i64);
    if time_minutes > PRACTICAL_TRIP_MINUTES {
        score = (score - SLOW_TRIP_PENALTY).max(MIN_ECO_SCORE);
    }
    score.clamp(MIN_ECO_SCORE, MAX_ECO_SCORE) as u8
}

fn validate_distance(distance_km: f64) -> Result<f64, ImpactError> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(ImpactError::invalid(
            "distance_km",
            distance_km,
            "must be a finite number > 0",
        ));
    }
    Ok(distance_km)
}

fn validate_profile(profile: &ModeProfile) -> Result<(), ImpactError> {
    if !profile.speed_kmh.is_finite() || profile.speed_kmh <= 0.0 {
        return Err(ImpactError::invalid(
            "speed_kmh",
            profile.speed_kmh,
            "must be a finite number > 0",
        ));
    }
    if !profile.co2_g_per_km.is_finite() || profile.co2_g_per_km < 0.0 {
        return Err(ImpactError::invalid(
            "co2_g_per_km",
            profile.co2_g_per_km,
            "must be a finite number >= 0",
        ));
    }
    if !profile.cost_per_km.is_finite() || profile.cost_per_km < 0.0 {
        return Err(ImpactError::invalid(
            "cost_per_km",
            profile.cost_per_km,
            "must be a finite number >= 0",
        ));
    }
    Ok(())
}

/// Round a non-negative figure to a whole unit, rejecting anything a `u64`
/// cannot hold exactly instead of saturating.
fn whole_units(field: &'static str, value: f64) -> Result<u64, ImpactError> {
    let rounded = value.round();
    // u64::MAX as f64 rounds up to 2^64, which is itself out of range.
    if !rounded.is_finite() || rounded < 0.0 || rounded >= u64::MAX as f64 {
        return Err(ImpactError::invalid(
            field,
            value,
            "is too large to represent as a whole number",
        ));
    }
    Ok(rounded as u64)
}

/// Evaluate one mode over `distance_km`. Not yet recommended.
pub fn evaluate_mode(
    mode: RouteMode,
    profile: &ModeProfile,
    distance_km: f64,
) -> Result<RouteOption, ImpactError> {
    let co2_grams = whole_units("co2_grams", profile.co2_g_per_km * distance_km)?;
    let cost = whole_units("cost", profile.cost_per_km * distance_km)?;
    let time_minutes = whole_units("time_minutes", distance_km / profile.speed_kmh * 60.0)?;
    Ok(RouteOption {
        mode,
        co2_grams,
        cost,
        time_minutes,
        score: eco_score(profile.co2_g_per_km, time_minutes),
        recommended: false,
    })
}

/// Index of the option to recommend.
///
/// Among practical options (time within the limit) the highest score wins,
/// then the lower cost, then the earlier position. With no practical option
/// the first one is recommended.
fn pick_recommended(options: &[RouteOption]) -> usize {
    let mut best: Option<usize> = None;
    for (i, option) in options.iter().enumerate() {
        if !option.is_practical() {
            continue;
        }
        let better = match best {
            None => true,
            Some(b) => {
                let current = &options[b];
                option.score > current.score
                    || (option.score == current.score && option.cost < current.cost)
            }
        };
        if better {
            best = Some(i);
        }
    }
    best.unwrap_or(0)
}

/// Compare modes with caller-supplied profiles.
pub fn compare_profiles(
    distance_km: f64,
    profiles: &[(RouteMode, ModeProfile)],
) -> Result<RouteComparison, ImpactError> {
    let distance_km = validate_distance(distance_km)?;
    if profiles.is_empty() {
        return Err(ImpactError::invalid_text(
            "modes",
            "[]",
            "at least one mode is required",
        ));
    }
    for (_, profile) in profiles {
        validate_profile(profile)?;
    }

    let mut options: Vec<RouteOption> = profiles
        .iter()
        .map(|(mode, profile)| evaluate_mode(*mode, profile, distance_km))
        .collect::<Result<_, _>>()?;
    let pick = pick_recommended(&options);
    options[pick].recommended = true;

    Ok(RouteComparison {
        distance_km,
        options,
    })
}

/// Compare `modes` over `distance_km` using the built-in mode profiles.
pub fn compare_routes(
    distance_km: f64,
    modes: &[RouteMode],
) -> Result<RouteComparison, ImpactError> {
    let profiles: Vec<(RouteMode, ModeProfile)> =
        modes.iter().map(|m| (*m, m.profile())).collect();
    compare_profiles(distance_km, &profiles)
}
