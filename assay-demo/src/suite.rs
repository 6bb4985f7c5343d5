//! The demonstration suite.

use assay_core::{
    CaseContext, Error, Outcome, ParameterSet, Registry, Severity, TestCase, check, check_eq,
    check_eq_mem, check_eq_str, check_op, check_some, likely, param, timing, unlikely,
};

/// Builds the registry the demo binary runs, in execution order.
pub(crate) fn registry() -> Result<Registry, Error> {
    Ok(Registry::new()
        .with(TestCase::with_fixture(
            "Testfoo",
            fixture_setup,
            fixture_test,
            fixture_teardown,
        ))
        .with(TestCase::new("test1", assertion_tour).with_severity(Severity::Warning))
        .with(TestCase::new("test3", always_passes).skip_as_pass())
        .with(TestCase::new("parameter_test", parameter_test).with_parameters(
            ParameterSet::builder(3)
                .strings("string-inputs", ["a1", "a2", "a3"])
                .param("integer-inputs", [100_i64, 200, 300, 500])
                .param("double-inputs", [1.1_f64, 1.2, 1.3])
                .build()?,
        ))
        .with(TestCase::new("operator_test", operator_test).with_parameters(
            ParameterSet::builder(5)
                .param("input1", [100_i64, 200, 300, 400, 500])
                .param("input2", [-50_i64, 10, 3, 4, 23])
                .param("expected", [50_i64, 210, 303, 4042, 523])
                .build()?,
        )))
}

fn fixture_setup(ctx: &mut CaseContext<'_>) -> String {
    ctx.log("Testfoo setup");
    String::from("hello")
}

fn fixture_test(ctx: &mut CaseContext<'_>, greeting: &mut String) -> Outcome {
    ctx.log("Testfoo test function");

    let ch = 'b';
    let pi = std::f64::consts::PI;

    check!(ctx, 0 != 1);
    check_op!(ctx, ch, ==, 'b');
    check_op!(ctx, ch, <, 'c');
    check_op!(ctx, pi, >, 3.0);

    ctx.log(format_args!("User arg:{greeting}"));
    greeting.push_str(", world");
    Ok(())
}

fn fixture_teardown(ctx: &mut CaseContext<'_>, mut greeting: String) {
    ctx.log("Testfoo teardown");
    greeting.insert_str(0, "User arg:");
    ctx.log(greeting);
}

fn assertion_tour(ctx: &mut CaseContext<'_>) -> Outcome {
    let integer_arg = Some(-523_i64);
    check_some!(ctx, integer_arg);
    // Warns but keeps going.
    likely!(ctx, integer_arg == Some(-520));

    let x = size_of::<f64>();
    likely!(ctx, size_of_val(&12.3_f64) == x);
    unlikely!(
        ctx,
        size_of_val(&123.22_f64) == x,
        "This is a very important mistake\n\
         sticker note is left here to make sure we never got this error!\n\
         which also shows how to put notes on assertion :)"
    );

    let str1 = "hello:)";
    let str2 = String::from("hello:)");
    check_eq_str!(ctx, str1, str2);

    let n1 = [1_i64, 2, 3];
    let n2 = vec![10_i64, 2, 3];
    check_eq_mem!(ctx, n1, n2, 3);

    Ok(())
}

fn always_passes(ctx: &mut CaseContext<'_>) -> Outcome {
    // Registered as skip-as-pass, so this never runs.
    check!(ctx, true);
    Ok(())
}

fn parameter_test(ctx: &mut CaseContext<'_>) -> Outcome {
    let text: String = param!(ctx, "string-inputs");
    check!(ctx, !text.is_empty());
    ctx.log(format_args!("Got string:'{text}'"));

    let integer: i64 = param!(ctx, "integer-inputs");
    ctx.log(format_args!("Got int:{integer}"));

    let double: f64 = param!(ctx, "double-inputs");
    ctx.log(format_args!("Got double:{}", timing::format_general(double)));

    let doubles = ctx.param_values::<f64>("double-inputs");
    check_some!(ctx, doubles);
    if let Some(&value) = doubles.and_then(|d| d.get(ctx.iteration())) {
        ctx.log(format_args!(
            "Double with iterator: {}",
            timing::format_general(value)
        ));
    }

    Ok(())
}

fn operator_test(ctx: &mut CaseContext<'_>) -> Outcome {
    let input1: i64 = param!(ctx, "input1");
    let input2: i64 = param!(ctx, "input2");
    let expected: i64 = param!(ctx, "expected");

    let sum = input1 + input2;
    check_eq!(ctx, sum, expected);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn)]
mod tests {
    use assay_core::{CaseStatus, Reporter, RunOptions, Runner, Transcript};

    use super::*;

    #[test]
    fn suite_outcomes() -> Result<(), Error> {
        let transcript = Transcript::new();
        let mut runner = Runner::with_reporter(
            RunOptions::default().with_summary(false),
            Reporter::transcript(&transcript),
        );
        let summary = runner.run(&registry()?)?;

        let statuses: Vec<_> = summary.iter().map(|r| (r.name.as_str(), r.status)).collect();
        assert_eq!(
            statuses,
            [
                ("Testfoo", CaseStatus::Passed),
                ("test1", CaseStatus::Failed),
                ("test3", CaseStatus::Skipped),
                ("parameter_test", CaseStatus::Passed),
                ("operator_test", CaseStatus::Passed),
            ]
        );

        let lines = transcript.lines();
        assert!(lines.contains(&"User arg:hello, world".to_owned()));
        assert!(lines.contains(&"Got string:'a2'".to_owned()));
        assert!(lines.contains(&"Double with iterator: 1.3".to_owned()));
        assert!(
            lines
                .iter()
                .any(|l| l.starts_with("integer_arg == Some(-520)  -->  likely failed"))
        );
        assert!(lines.contains(&"Note:{This is a very important mistake".to_owned()));
        Ok(())
    }
}
