//! Building blocks for evaluators.
//!
//! Each function returns a closure that can be handed to
//! [`Registry::register_flag`](crate::Registry::register_flag).

use crate::error::FlagError;
use crate::resolver::Resolver;
use capflags_domain::FlagValue;

/// Always `value`.
pub fn constant(
    value: impl Into<FlagValue>,
) -> impl Fn(&Resolver<'_>) -> Result<FlagValue, FlagError> + Send + Sync + 'static {
    let value = value.into();
    move |_: &Resolver<'_>| Ok(value)
}

/// `prerequisite && condition`.
///
/// `condition` is not evaluated when the prerequisite is false.
pub fn requires<F>(
    prerequisite: &'static str,
    condition: F,
) -> impl Fn(&Resolver<'_>) -> Result<FlagValue, FlagError> + Send + Sync + 'static
where
    F: Fn(&Resolver<'_>) -> Result<bool, FlagError> + Send + Sync + 'static,
{
    move |resolver: &Resolver<'_>| {
        Ok(FlagValue::Bool(resolver.get_bool(prerequisite)? && condition(resolver)?))
    }
}

/// The value of `prerequisite` itself, for flags that are on whenever another one is.
pub fn follows(
    prerequisite: &'static str,
) -> impl Fn(&Resolver<'_>) -> Result<FlagValue, FlagError> + Send + Sync + 'static {
    requires(prerequisite, |_| Ok(true))
}

/// `min(value, ceiling)`.
pub fn at_most<F>(
    ceiling: f64,
    value: F,
) -> impl Fn(&Resolver<'_>) -> Result<FlagValue, FlagError> + Send + Sync + 'static
where
    F: Fn(&Resolver<'_>) -> Result<f64, FlagError> + Send + Sync + 'static,
{
    move |resolver: &Resolver<'_>| Ok(FlagValue::Number(value(resolver)?.min(ceiling)))
}

/// `when_true` if the boolean flag `condition` holds, `when_false` otherwise.
pub fn select(
    condition: &'static str,
    when_true: impl Into<FlagValue>,
    when_false: impl Into<FlagValue>,
) -> impl Fn(&Resolver<'_>) -> Result<FlagValue, FlagError> + Send + Sync + 'static {
    let (when_true, when_false) = (when_true.into(), when_false.into());
    move |resolver: &Resolver<'_>| {
        Ok(if resolver.get_bool(condition)? { when_true } else { when_false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;
    use capflags_domain::FlagKind;

    #[test]
    fn at_most_clamps_only_above_the_ceiling() {
        let registry = Registry::new();
        registry.register_flag("HIGH", FlagKind::Number, at_most(16.0, |_| Ok(20.0))).unwrap();
        registry.register_flag("LOW", FlagKind::Number, at_most(16.0, |_| Ok(10.0))).unwrap();

        assert!((registry.get_number("HIGH").unwrap() - 16.0).abs() < f64::EPSILON);
        assert!((registry.get_number("LOW").unwrap() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn select_picks_by_condition() {
        let registry = Registry::new();
        registry.register_flag("ON", FlagKind::Bool, constant(true)).unwrap();
        registry.register_flag("SIZE", FlagKind::Number, select("ON", 4, 0)).unwrap();

        assert_eq!(registry.get("SIZE").unwrap(), FlagValue::Number(4.0));
        registry.set("ON", false).unwrap();
        registry.unset("SIZE").unwrap();
        assert_eq!(registry.get("SIZE").unwrap(), FlagValue::Number(0.0));
    }

    #[test]
    fn requires_skips_condition_when_prerequisite_is_false() {
        let registry = Registry::new();
        registry.register_flag("BASE", FlagKind::Bool, constant(false)).unwrap();
        registry
            .register_flag(
                "DERIVED",
                FlagKind::Bool,
                requires("BASE", |_| Err("condition must not run".into())),
            )
            .unwrap();

        assert!(!registry.get_bool("DERIVED").unwrap());
    }
}
