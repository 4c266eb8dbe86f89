/// Maximum strength bonus granted to a home side with `home_factor` 10
pub const HOME_BONUS_FACTOR: f64 = 2.0;

/// Compression applied before the log attenuation (the smaller, the more balanced the results)
pub const LOG_ADJUST_FACTOR: f64 = 0.5;

/// Impact of recent form on match strength
pub const RECENT_FORM_CONTRIBUTION_IMPACT: f64 = 0.08;

/// Impact of squad morale on match strength
pub const MORALE_CONTRIBUTION_IMPACT: f64 = 0.05;

/// Impact of physical condition on match strength
pub const PHYSICAL_CONDITION_CONTRIBUTION_IMPACT: f64 = 0.068;

/// Weight of each of the last matches in the form contribution, most recent first
pub const RECENT_FORM_WEIGHTS: [f64; 5] = [0.35, 0.20, 0.15, 0.15, 0.15];

/// Number of past results a team keeps
pub const FORM_WINDOW: usize = RECENT_FORM_WEIGHTS.len();

/// Spread of the post-match morale update; the mean shifts by this much per goal of margin
pub const MORALE_UPDATE_STDDEV: f64 = 0.2;

/// Spread of the post-match physical condition update
pub const PHYSICAL_CONDITION_UPDATE_STDDEV: f64 = 0.3;

/// Spread of the attribute change caused by a random between-rounds event
pub const EVENT_UPDATE_STDDEV: f64 = 4.0;

/// Lower and upper bound of every rating and dynamic attribute
pub const ATTRIBUTE_MIN: f64 = 0.0;
pub const ATTRIBUTE_MAX: f64 = 10.0;

/// Neutral value of a contribution; yields a multiplier of exactly 1
pub const NEUTRAL_CONTRIBUTION: f64 = 5.0;

/// Starting morale and physical condition of every team
pub const INITIAL_DYNAMIC_ATTRIBUTE: f64 = 5.0;

/// League points
pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// Goals per side considered by the analytic outcome predictor
pub const MAX_PREDICTED_GOALS: u64 = 15;
