// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root margin model.
//!
//! A [`RootMargin`] grows (positive values) or shrinks (negative values) the
//! reference viewport before intersection is computed. It follows the CSS
//! `margin` shorthand: one to four whitespace-separated lengths in `px` or
//! `%`, expanding as top/right/bottom/left.
//!
//! Browsers reject any other syntax with an exception at observer
//! construction, so configuration parses the margin up front and falls back
//! to [`RootMargin::ZERO`] instead of handing the platform a string it would
//! refuse.

use core::fmt;

use kurbo::{Insets, Rect};

/// One side of a [`RootMargin`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// Absolute CSS pixels.
    Px(f64),
    /// Percentage of the root's width (left/right) or height (top/bottom).
    Percent(f64),
}

impl Length {
    /// Resolves the length against the extent of the matching root axis.
    #[must_use]
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => extent * p / 100.0,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        if let Some(n) = token.strip_suffix("px") {
            finite(n).map(Self::Px)
        } else if let Some(n) = token.strip_suffix('%') {
            finite(n).map(Self::Percent)
        } else {
            // Only a bare zero may omit its unit.
            finite(token).filter(|v| *v == 0.0).map(Self::Px)
        }
    }
}

fn finite(number: &str) -> Option<f64> {
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// A CSS-style margin applied to the intersection root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    /// Top edge offset.
    pub top: Length,
    /// Right edge offset.
    pub right: Length,
    /// Bottom edge offset.
    pub bottom: Length,
    /// Left edge offset.
    pub left: Length,
}

/// Why a margin string was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarginParseError {
    /// The string contained no lengths.
    Empty,
    /// More than four lengths were given.
    TooManyValues(usize),
    /// The length at this position is not a `px`/`%` value.
    InvalidLength(usize),
}

impl fmt::Display for MarginParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("root margin is empty"),
            Self::TooManyValues(n) => write!(f, "root margin has {n} values, at most 4 allowed"),
            Self::InvalidLength(i) => {
                write!(f, "root margin value {i} must be a length in px or %")
            }
        }
    }
}

impl core::error::Error for MarginParseError {}

impl RootMargin {
    /// The `"0px"` margin: the viewport is used as-is.
    pub const ZERO: Self = Self::uniform(Length::Px(0.0));

    /// A margin with the same length on every side.
    #[must_use]
    pub const fn uniform(length: Length) -> Self {
        Self {
            top: length,
            right: length,
            bottom: length,
            left: length,
        }
    }

    /// Parses CSS margin shorthand (`"10px"`, `"0px 20%"`, `"1px 2px 3px"`,
    /// `"1px 2px 3px 4px"`).
    pub fn parse(input: &str) -> Result<Self, MarginParseError> {
        let mut values = [Length::Px(0.0); 4];
        let mut count = 0;
        for (i, token) in input.split_whitespace().enumerate() {
            if i >= 4 {
                return Err(MarginParseError::TooManyValues(input.split_whitespace().count()));
            }
            values[i] = Length::parse(token).ok_or(MarginParseError::InvalidLength(i))?;
            count = i + 1;
        }
        let [a, b, c, d] = values;
        match count {
            0 => Err(MarginParseError::Empty),
            1 => Ok(Self::uniform(a)),
            2 => Ok(Self {
                top: a,
                right: b,
                bottom: a,
                left: b,
            }),
            3 => Ok(Self {
                top: a,
                right: b,
                bottom: c,
                left: b,
            }),
            _ => Ok(Self {
                top: a,
                right: b,
                bottom: c,
                left: d,
            }),
        }
    }

    /// Parses `input`, falling back to [`RootMargin::ZERO`] when absent or
    /// malformed.
    #[must_use]
    pub fn parse_or_zero(input: Option<&str>) -> Self {
        input.and_then(|s| Self::parse(s).ok()).unwrap_or(Self::ZERO)
    }

    /// Resolves the margin to absolute insets for a given root rectangle.
    #[must_use]
    pub fn insets(&self, root: Rect) -> Insets {
        let (w, h) = (root.width(), root.height());
        Insets::new(
            self.left.resolve(w),
            self.top.resolve(h),
            self.right.resolve(w),
            self.bottom.resolve(h),
        )
    }

    /// Returns the effective root rectangle after applying the margin.
    #[must_use]
    pub fn apply(&self, root: Rect) -> Rect {
        root + self.insets(root)
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Writes the shortest equivalent shorthand, suitable for handing to the
/// platform observer.
impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            top,
            right,
            bottom,
            left,
        } = self;
        if right == left {
            if top == bottom {
                if top == right {
                    write!(f, "{top}")
                } else {
                    write!(f, "{top} {right}")
                }
            } else {
                write!(f, "{top} {right} {bottom}")
            }
        } else {
            write!(f, "{top} {right} {bottom} {left}")
        }
    }
}
