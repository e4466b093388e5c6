pub const WIN_COLOR: &str = "#28a745";
pub const LOSS_COLOR: &str = "#dc3545";
pub const DRAW_COLOR: &str = "#ffc107";

/// Stand-ins for a goalless draw so its bar still shows a sliver of the result color.
pub const ZERO_ZERO_GOALS_FOR: f64 = 0.2;
pub const ZERO_ZERO_GOALS_AGAINST: f64 = -0.2;

/// The team's season progression, one entry per match, index aligned across every field.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartPayload {
	pub labels: Vec<String>,
	/// The running metric, such as cumulative points.
	pub values: Vec<f64>,
	pub results: Vec<MatchResult>,
	pub gf: Vec<f64>,
	/// Goals against, already negated so conceded goals plot below zero.
	pub ga: Vec<f64>,
}

/// Any code other than `"W"` or `"L"` is a draw, including codes that are not strings at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "ResultCode", into = "String")]
pub enum MatchResult {
	Win,
	Loss,
	Draw,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ResultCode {
	Code(String),
	Other(serde::de::IgnoredAny),
}

impl From<ResultCode> for MatchResult {
	fn from(code: ResultCode) -> MatchResult {
		match code {
			ResultCode::Code(code) => MatchResult::from(code),
			ResultCode::Other(_) => MatchResult::Draw,
		}
	}
}

impl From<String> for MatchResult {
	fn from(code: String) -> MatchResult {
		match code.as_str() {
			"W" => MatchResult::Win,
			"L" => MatchResult::Loss,
			_ => MatchResult::Draw,
		}
	}
}

impl From<MatchResult> for String {
	fn from(result: MatchResult) -> String {
		match result {
			MatchResult::Win => "W",
			MatchResult::Loss => "L",
			MatchResult::Draw => "D",
		}
		.to_owned()
	}
}

impl MatchResult {
	pub fn color(self) -> &'static str {
		match self {
			MatchResult::Win => WIN_COLOR,
			MatchResult::Loss => LOSS_COLOR,
			MatchResult::Draw => DRAW_COLOR,
		}
	}
}

impl ChartPayload {
	/// One color per match, shared by the goals for and goals against bars.
	pub fn bar_colors(&self) -> Vec<&'static str> {
		self.results.iter().map(|result| result.color()).collect()
	}

	/// Returns the goals for and goals against series with goalless matches replaced by the sentinels.
	pub fn adjusted_goals(&self) -> (Vec<f64>, Vec<f64>) {
		let is_goalless = |gf: Option<&f64>, ga: Option<&f64>| match (gf, ga) {
			(Some(gf), Some(ga)) => *gf == 0.0 && *ga == 0.0,
			_ => false,
		};
		let gf = self
			.gf
			.iter()
			.enumerate()
			.map(|(index, value)| {
				if is_goalless(Some(value), self.ga.get(index)) {
					ZERO_ZERO_GOALS_FOR
				} else {
					*value
				}
			})
			.collect();
		let ga = self
			.ga
			.iter()
			.enumerate()
			.map(|(index, value)| {
				if is_goalless(self.gf.get(index), Some(value)) {
					ZERO_ZERO_GOALS_AGAINST
				} else {
					*value
				}
			})
			.collect();
		(gf, ga)
	}
}
