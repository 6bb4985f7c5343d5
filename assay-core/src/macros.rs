//! Assertion macros.
//!
//! Each macro takes the case context first and an optional note last; the note is written
//! with `format!` syntax and only appears in the report when the check triggers. Hard
//! checks `return` the failure from the enclosing test function, so they can only be used
//! in functions returning [`crate::Outcome`] (or any `Result` whose error type converts
//! from [`crate::Failure`]). Soft checks never return.

/// Expands to the [`crate::Location`] of the call site.
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(::core::file!(), ::core::module_path!(), ::core::line!())
    };
}

/// Builds the optional note passed to [`crate::CaseContext::evaluate`].
#[doc(hidden)]
#[macro_export]
macro_rules! __note {
    () => {
        ::core::option::Option::None
    };
    ($($arg:tt)+) => {
        ::core::option::Option::Some(::core::format_args!($($arg)+))
    };
}

/// Evaluates a hard check and returns from the enclosing function when it triggers.
#[doc(hidden)]
#[macro_export]
macro_rules! __hard {
    ($ctx:expr, $ctor:ident, $family:expr, $text:expr, $predicate:expr $(, $($arg:tt)+)?) => {
        if let ::core::result::Result::Err(failure) = $ctx.evaluate(
            &$crate::Assertion::$ctor($family, $text, $crate::location!()),
            $predicate,
            $crate::__note!($($($arg)+)?),
        ) {
            return ::core::result::Result::Err(::core::convert::From::from(failure));
        }
    };
}

/// Fails the test function when `condition` is false.
///
/// ```ignore
/// check!(ctx, value > 0);
/// check!(ctx, value > 0, "value was {value}");
/// ```
#[macro_export]
macro_rules! check {
    ($ctx:expr, $condition:expr $(, $($arg:tt)+)?) => {
        $crate::__hard!(
            $ctx,
            hard,
            "assert",
            ::core::stringify!($condition),
            $condition
            $(, $($arg)+)?
        )
    };
}

/// Fails the test function when `condition` is true.
#[macro_export]
macro_rules! check_false {
    ($ctx:expr, $condition:expr $(, $($arg:tt)+)?) => {
        $crate::__hard!(
            $ctx,
            hard_negated,
            "assert",
            ::core::stringify!($condition),
            $condition
            $(, $($arg)+)?
        )
    };
}

/// Fails the test function unless `left == right`.
#[macro_export]
macro_rules! check_eq {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {
        $crate::__hard!(
            $ctx,
            hard,
            "assert",
            ::core::concat!(::core::stringify!($left), " == ", ::core::stringify!($right)),
            $left == $right
            $(, $($arg)+)?
        )
    };
}

/// Fails the test function unless `left <op> right` holds.
///
/// ```ignore
/// check_op!(ctx, a + b, <=, limit);
/// ```
#[macro_export]
macro_rules! check_op {
    ($ctx:expr, $left:expr, $op:tt, $right:expr $(, $($arg:tt)+)?) => {
        $crate::__hard!(
            $ctx,
            hard,
            "assert",
            ::core::concat!(
                ::core::stringify!($left),
                " ",
                ::core::stringify!($op),
                " ",
                ::core::stringify!($right)
            ),
            $left $op $right
            $(, $($arg)+)?
        )
    };
}

/// Fails the test function unless the two string-like values are equal.
#[macro_export]
macro_rules! check_eq_str {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {
        $crate::__hard!(
            $ctx,
            hard,
            "assert_eqstr",
            ::core::concat!(::core::stringify!($left), " == ", ::core::stringify!($right)),
            ::core::convert::AsRef::<str>::as_ref(&$left)
                == ::core::convert::AsRef::<str>::as_ref(&$right)
            $(, $($arg)+)?
        )
    };
}

/// Fails the test function unless the first `len` elements of both sequences are equal.
///
/// A sequence shorter than `len` fails the check.
#[macro_export]
macro_rules! check_eq_mem {
    ($ctx:expr, $left:expr, $right:expr, $len:expr $(, $($arg:tt)+)?) => {
        $crate::__hard!(
            $ctx,
            hard,
            "assert_eqmem",
            ::core::concat!(
                ::core::stringify!($left),
                "[..",
                ::core::stringify!($len),
                "] == ",
                ::core::stringify!($right),
                "[..",
                ::core::stringify!($len),
                "]"
            ),
            $crate::prefix_eq(&$left[..], &$right[..], $len)
            $(, $($arg)+)?
        )
    };
}

/// Fails the test function when `option` is `None`.
#[macro_export]
macro_rules! check_some {
    ($ctx:expr, $option:expr $(, $($arg:tt)+)?) => {
        $crate::__hard!(
            $ctx,
            hard,
            "assert",
            ::core::concat!(::core::stringify!($option), ".is_some()"),
            ::core::option::Option::is_some(&$option)
            $(, $($arg)+)?
        )
    };
}

/// Warns when `condition` is false. Active only at [`crate::Severity::Warning`] or above.
#[macro_export]
macro_rules! likely {
    ($ctx:expr, $condition:expr $(, $($arg:tt)+)?) => {{
        $ctx.evaluate_soft(
            &$crate::Assertion::likely(::core::stringify!($condition), $crate::location!()),
            $condition,
            $crate::__note!($($($arg)+)?),
        );
    }};
}

/// Warns when `condition` is true. Active only at [`crate::Severity::Warning`] or above.
#[macro_export]
macro_rules! unlikely {
    ($ctx:expr, $condition:expr $(, $($arg:tt)+)?) => {{
        $ctx.evaluate_soft(
            &$crate::Assertion::unlikely(::core::stringify!($condition), $crate::location!()),
            $condition,
            $crate::__note!($($($arg)+)?),
        );
    }};
}

/// Reads the current iteration's value of a parameter, returning an internal-assert
/// failure from the enclosing test function when the key is missing.
///
/// ```ignore
/// let input: i64 = param!(ctx, "input1");
/// let name = param!(ctx, "names", String);
/// ```
#[macro_export]
macro_rules! param {
    ($ctx:expr, $key:expr) => {
        match $ctx.require_param($key, $crate::location!()) {
            ::core::result::Result::Ok(value) => value,
            ::core::result::Result::Err(failure) => {
                return ::core::result::Result::Err(::core::convert::From::from(failure));
            }
        }
    };
    ($ctx:expr, $key:expr, $ty:ty) => {
        match $ctx.require_param::<$ty>($key, $crate::location!()) {
            ::core::result::Result::Ok(value) => value,
            ::core::result::Result::Err(failure) => {
                return ::core::result::Result::Err(::core::convert::From::from(failure));
            }
        }
    };
}
