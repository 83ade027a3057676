//! Maven version ordering and version ranges, as used by exclude patterns.
//!
//! Versions are split into items on `.`, `-` and digit/letter transitions.
//! Numeric items compare as numbers; well-known qualifiers follow
//! `alpha` < `beta` < `milestone` < `rc` < `snapshot` < release < `sp`,
//! and any other qualifier sorts after `sp`, alphabetically.

use std::cmp::Ordering;
use std::fmt;

use converge_util::errors::ConvergeError;

/// A parsed Maven version.
#[derive(Debug, Clone)]
pub struct MavenVersion {
    original: String,
    items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Number(u64),
    Qualifier(u8, String),
}

const RELEASE_RANK: u8 = 5;

fn qualifier_rank(token: &str) -> u8 {
    match token {
        "alpha" | "a" => 0,
        "beta" | "b" => 1,
        "milestone" | "m" => 2,
        "rc" | "cr" => 3,
        "snapshot" => 4,
        "" | "ga" | "final" | "release" => RELEASE_RANK,
        "sp" => 6,
        _ => 7,
    }
}

impl Item {
    fn parse(token: &str) -> Self {
        match token.parse::<u64>() {
            Ok(n) => Item::Number(n),
            Err(_) => {
                let lower = token.to_ascii_lowercase();
                Item::Qualifier(qualifier_rank(&lower), lower)
            }
        }
    }

    /// Items that disappear when they trail a version (`1.0` == `1`).
    fn is_null(&self) -> bool {
        match self {
            Item::Number(n) => *n == 0,
            Item::Qualifier(rank, _) => *rank == RELEASE_RANK,
        }
    }

    fn cmp_item(&self, other: Option<&Item>) -> Ordering {
        match (self, other) {
            (Item::Number(n), None) => n.cmp(&0),
            (Item::Qualifier(rank, _), None) => rank.cmp(&RELEASE_RANK),
            (Item::Number(a), Some(Item::Number(b))) => a.cmp(b),
            (Item::Number(_), Some(Item::Qualifier(..))) => Ordering::Greater,
            (Item::Qualifier(..), Some(Item::Number(_))) => Ordering::Less,
            (Item::Qualifier(ra, a), Some(Item::Qualifier(rb, b))) => {
                ra.cmp(rb).then_with(|| a.cmp(b))
            }
        }
    }
}

impl MavenVersion {
    pub fn parse(version: &str) -> Self {
        let mut items = Vec::new();
        let mut token = String::new();
        let mut in_digits = false;

        for ch in version.trim().chars() {
            if ch == '.' || ch == '-' {
                items.push(Item::parse(&token));
                token.clear();
                continue;
            }
            let is_digit = ch.is_ascii_digit();
            if !token.is_empty() && is_digit != in_digits {
                items.push(Item::parse(&token));
                token.clear();
            }
            in_digits = is_digit;
            token.push(ch);
        }
        items.push(Item::parse(&token));

        while items.last().is_some_and(Item::is_null) {
            items.pop();
        }

        Self {
            original: version.to_string(),
            items,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MavenVersion {}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        for i in 0..len {
            let ord = match (self.items.get(i), other.items.get(i)) {
                (Some(a), b) => a.cmp_item(b),
                (None, Some(b)) => b.cmp_item(None).reverse(),
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// One end of a [`VersionRange`].
#[derive(Debug, Clone)]
pub struct Bound {
    pub version: MavenVersion,
    pub inclusive: bool,
}

/// A bracketed Maven version range: `[1.0,2.0)`, `(,2.0]`, `[1.5,]`, `[1.5]`.
#[derive(Debug, Clone)]
pub struct VersionRange {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

impl VersionRange {
    /// `true` if `spec` is written in range syntax rather than as a bare version.
    pub fn is_range_spec(spec: &str) -> bool {
        let s = spec.trim_start();
        s.starts_with('[') || s.starts_with('(')
    }

    /// Parse a range, rejecting anything malformed.
    pub fn parse(spec: &str) -> Result<Self, ConvergeError> {
        let invalid = |reason: &str| ConvergeError::Config {
            message: format!("invalid version range '{spec}': {reason}"),
        };

        let s = spec.trim();
        let open_inclusive = match s.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(invalid("must start with '[' or '('")),
        };
        let close_inclusive = match s.chars().last() {
            Some(']') if s.len() > 1 => true,
            Some(')') if s.len() > 1 => false,
            _ => return Err(invalid("must end with ']' or ')'")),
        };
        let inner = &s[1..s.len() - 1];
        if inner.contains(&['[', ']', '(', ')'][..]) {
            return Err(invalid("multiple ranges are not supported"));
        }

        let Some((lower, upper)) = inner.split_once(',') else {
            let exact = inner.trim();
            if !open_inclusive || !close_inclusive {
                return Err(invalid("a single version must be enclosed in '[' and ']'"));
            }
            if exact.is_empty() {
                return Err(invalid("empty range"));
            }
            let bound = Bound {
                version: MavenVersion::parse(exact),
                inclusive: true,
            };
            return Ok(Self {
                lower: Some(bound.clone()),
                upper: Some(bound),
            });
        };

        if upper.contains(',') {
            return Err(invalid("too many ',' separators"));
        }
        let bound = |text: &str, inclusive: bool| {
            let text = text.trim();
            (!text.is_empty()).then(|| Bound {
                version: MavenVersion::parse(text),
                inclusive,
            })
        };
        let range = Self {
            lower: bound(lower, open_inclusive),
            upper: bound(upper, close_inclusive),
        };

        if let (Some(lo), Some(hi)) = (&range.lower, &range.upper) {
            if lo.version > hi.version {
                return Err(invalid("lower bound is greater than upper bound"));
            }
            if lo.version == hi.version && !(lo.inclusive && hi.inclusive) {
                return Err(invalid("range is empty"));
            }
        }
        Ok(range)
    }

    /// Check if a version satisfies this range.
    pub fn contains(&self, version: &MavenVersion) -> bool {
        let above_lower = self.lower.as_ref().map_or(true, |lo| match version.cmp(&lo.version) {
            Ordering::Greater => true,
            Ordering::Equal => lo.inclusive,
            Ordering::Less => false,
        });
        let below_upper = self.upper.as_ref().map_or(true, |hi| match version.cmp(&hi.version) {
            Ordering::Less => true,
            Ordering::Equal => hi.inclusive,
            Ordering::Greater => false,
        });
        above_lower && below_upper
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = match &self.lower {
            Some(b) if b.inclusive => '[',
            Some(_) => '(',
            None => '(',
        };
        let close = match &self.upper {
            Some(b) if b.inclusive => ']',
            Some(_) => ')',
            None => ')',
        };
        let lower = self.lower.as_ref().map(|b| b.version.as_str()).unwrap_or("");
        let upper = self.upper.as_ref().map(|b| b.version.as_str()).unwrap_or("");
        write!(f, "{open}{lower},{upper}{close}")
    }
}
