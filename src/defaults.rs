pub mod scoring {
    pub const COMPLEXITY_WEIGHT: f64 = 0.50;
    pub const LENGTH_WEIGHT: f64 = 0.15;
    pub const COMMENT_WEIGHT: f64 = 0.15;
    pub const NAMING_WEIGHT: f64 = 0.20;
    pub const HEADER_COMMENT_WEIGHT: f64 = 0.70;
    pub const HEADER_NAMING_WEIGHT: f64 = 0.30;
    pub const MAX_COMPLEXITY: f64 = 20.0;
    pub const IDEAL_FUNCTION_LENGTH: f64 = 10.0;
    pub const MAX_FUNCTION_LENGTH: f64 = 100.0;
    pub const IDEAL_COMMENT_RATIO: f64 = 15.0;
    pub const HEADER_COMMENT_TARGET: f64 = 30.0;
    pub const NAMING_PENALTY: f64 = 5.0;
}

pub mod report {
    pub const WARN_INDEX: f64 = 40.0;
    pub const CRITICAL_INDEX: f64 = 60.0;
    pub const SHOW_FUNCTIONS: bool = true;
}

pub fn default_config_toml() -> String {
    use report as r;
    use scoring as s;
    format!(
        r"[scoring]
complexity_weight = {cw:.2}
length_weight = {lw:.2}
comment_weight = {mw:.2}
naming_weight = {nw:.2}
header_comment_weight = {hcw:.2}
header_naming_weight = {hnw:.2}
max_complexity = {max_cx:.1}
ideal_function_length = {ideal_len:.1}
max_function_length = {max_len:.1}
ideal_comment_ratio = {ideal_ratio:.1}
header_comment_target = {header_target:.1}
naming_penalty = {penalty:.1}

[report]
warn_index = {warn:.1}
critical_index = {critical:.1}
show_functions = {show_fns}

[analysis]
ignore = []
",
        cw = s::COMPLEXITY_WEIGHT,
        lw = s::LENGTH_WEIGHT,
        mw = s::COMMENT_WEIGHT,
        nw = s::NAMING_WEIGHT,
        hcw = s::HEADER_COMMENT_WEIGHT,
        hnw = s::HEADER_NAMING_WEIGHT,
        max_cx = s::MAX_COMPLEXITY,
        ideal_len = s::IDEAL_FUNCTION_LENGTH,
        max_len = s::MAX_FUNCTION_LENGTH,
        ideal_ratio = s::IDEAL_COMMENT_RATIO,
        header_target = s::HEADER_COMMENT_TARGET,
        penalty = s::NAMING_PENALTY,
        warn = r::WARN_INDEX,
        critical = r::CRITICAL_INDEX,
        show_fns = r::SHOW_FUNCTIONS,
    )
}
