//! Filter functions that produce left-hand-side expression fragments.

use serde_json::Value;

use crate::text;

/// A function of the filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterFunction {
    /// `indexof(text,search)`
    IndexOf,
    /// `substring(text,pos[,len])`
    Substring,
    /// `length(text)`
    Length,
    /// `tolower(text)`
    ToLower,
    /// `toupper(text)`
    ToUpper,
    /// `trim(text)`
    Trim,
    /// `concat(text,other...)`
    Concat,
    /// `startswith(text,prefix)`
    StartsWith,
    /// `endswith(text,suffix)`
    EndsWith,
    /// `substringof(search,text)`
    SubstringOf,
    /// `day(date)`
    Day,
    /// `hour(date)`
    Hour,
    /// `minute(date)`
    Minute,
    /// `month(date)`
    Month,
    /// `second(date)`
    Second,
    /// `year(date)`
    Year,
    /// `round(number)`
    Round,
    /// `floor(number)`
    Floor,
}

impl FilterFunction {
    /// Returns the function name as it appears on the wire.
    pub fn name(self) -> &'static str {
        match self {
            FilterFunction::IndexOf => "indexof",
            FilterFunction::Substring => "substring",
            FilterFunction::Length => "length",
            FilterFunction::ToLower => "tolower",
            FilterFunction::ToUpper => "toupper",
            FilterFunction::Trim => "trim",
            FilterFunction::Concat => "concat",
            FilterFunction::StartsWith => "startswith",
            FilterFunction::EndsWith => "endswith",
            FilterFunction::SubstringOf => "substringof",
            FilterFunction::Day => "day",
            FilterFunction::Hour => "hour",
            FilterFunction::Minute => "minute",
            FilterFunction::Month => "month",
            FilterFunction::Second => "second",
            FilterFunction::Year => "year",
            FilterFunction::Round => "round",
            FilterFunction::Floor => "floor",
        }
    }

    /// Renders a call with already-rendered arguments.
    ///
    /// ```rust
    /// use most_query::FilterFunction;
    ///
    /// let call = FilterFunction::Substring.call(&["name", "1", "2"]);
    /// assert_eq!(call, "substring(name,1,2)");
    /// ```
    pub fn call<S: AsRef<str>>(self, args: &[S]) -> String {
        let args = args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        text::format(
            "%s(%s)",
            &[Value::from(self.name()), Value::from(args)],
        )
    }
}

impl std::fmt::Display for FilterFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
