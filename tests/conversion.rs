use tap2junit::{Conversion, Outcome};

fn convert(input: &str, suite_name: &str) -> (Outcome, String) {
    let conversion = Conversion {
        suite_name: suite_name.to_owned(),
        ..Conversion::default()
    };
    let mut buf = Vec::new();
    let outcome = conversion.convert(input, &mut buf).unwrap();
    (outcome, String::from_utf8(buf).unwrap())
}

fn convert_strict(input: &str) -> (Outcome, String) {
    let conversion = Conversion {
        strict: true,
        ..Conversion::default()
    };
    let mut buf = Vec::new();
    let outcome = conversion.convert(input, &mut buf).unwrap();
    (outcome, String::from_utf8(buf).unwrap())
}

#[test]
fn round_trip_example() {
    let (outcome, xml) = convert(
        "1..2\n\
         ok 1 - addition works\n\
         not ok 2 - subtraction broken\n",
        "Demo",
    );

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <testsuites>\n  \
           <testsuite name=\"Demo\" tests=\"2\" failures=\"1\" errors=\"0\" \
             skipped=\"0\" todo=\"0\" time=\"0\" id=\"1\">\n    \
             <testcase name=\"1 addition works\" status=\"pass\" \
               classname=\"Demo.1-addition-works\" time=\"0\"/>\n    \
             <testcase name=\"2 subtraction broken\" status=\"fail\" \
               classname=\"Demo.2-subtraction-broken\" time=\"0\">\n      \
               <failure type=\"TAPTestFailed\" \
                 message=\"not ok 2 - subtraction broken\"/>\n    \
             </testcase>\n  \
           </testsuite>\n\
         </testsuites>\n",
    );
}

#[test]
fn tests_attribute_matches_the_plan() {
    let (_, xml) = convert("1..3\nok 1\nok 2\nok 3\n", "Demo");

    assert!(xml.contains("tests=\"3\""));
    assert_eq!(xml.matches("<testcase").count(), 3);
}

#[test]
fn bail_out_truncates_the_report() {
    let (_, xml) = convert(
        "1..3\n\
         ok 1 - reached\n\
         Bail out! DB is down\n\
         ok 2 - unreachable\n\
         ok 3 - unreachable too\n",
        "Demo",
    );

    assert_eq!(xml.matches("<testcase").count(), 2);
    assert!(!xml.contains("unreachable"));
    assert!(xml.contains("name=\"BailOut\" status=\"fail\""));
    assert!(xml.contains("<failure type=\"BailOut\" message=\"DB is down\"/>"));
}

#[test]
fn todo_directive_is_tallied_and_mangled_into_the_classname() {
    let (_, xml) = convert("1..3\nok 1\nok 2\nok 3 # TODO not yet\n", "Demo");

    assert!(xml.contains("todo=\"1\""));
    assert!(xml.contains("classname=\"Demo.3.TODO-not-yet\""));
}

#[test]
fn skip_directive_is_tallied_as_skipped() {
    let (_, xml) = convert("1..2\nok 1\nok 2 # SKIP offline\n", "Demo");

    assert!(xml.contains("skipped=\"1\""));
    assert!(xml.contains("classname=\"Demo.2.SKIP-offline\""));
}

#[test]
fn comments_are_collected_but_never_emitted() {
    let (_, xml) = convert(
        "1..1\n\
         # a comment before\n\
         ok 1 - works\n\
         # a trailing comment block\n\
         # of several lines\n",
        "Demo",
    );

    assert_eq!(xml.matches("<testcase").count(), 1);
    assert!(!xml.contains("comment"));
}

#[test]
fn lenient_mode_tolerates_foreign_output() {
    let (outcome, xml) = convert(
        "make[1]: Entering directory '/src'\n\
         1..2\n\
         ok 1\n\
         Some stray diagnostic\n\
         ok 2\n",
        "Demo",
    );

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(xml.matches("<testcase").count(), 2);
    assert!(xml.contains("failures=\"0\""));
}

#[test]
fn trailing_summary_report_is_not_misread_as_tap() {
    let (_, xml) = convert(
        "1..2\n\
         ok 1\n\
         not ok 2\n\
         Test Summary Report\n\
         -------------------\n\
         t/demo.t (Wstat: 256 Tests: 2 Failed: 1)\n\
         Failed test:  2\n\
         Result: FAIL\n",
        "Demo",
    );

    assert_eq!(xml.matches("<testcase").count(), 2);
    assert!(!xml.contains("Wstat"));
}

#[test]
fn strict_mode_replaces_the_report_on_parse_errors() {
    let (outcome, xml) = convert_strict(
        "1..2\n\
         this is not TAP\n\
         ok 1\n\
         neither is this\n\
         ok 2\n",
    );

    assert_eq!(outcome, Outcome::TestsNotRun);
    assert_eq!(outcome.exit_code(), 86);
    assert!(xml.contains("<testsuite name=\"TestsNotRun.ParseError\""));
    assert!(xml.contains("errors=\"2\""));
    assert!(xml.contains("failures=\"0\""));
    assert!(xml.contains("name=\"Error_01\""));
    assert!(xml.contains("name=\"Error_02\""));
    assert!(xml.contains("<error type=\"TAPParseError\""));
    // The actual test results are suppressed entirely.
    assert!(!xml.contains("status=\"pass\""));
}

#[test]
fn strict_mode_passes_clean_input_through() {
    let (outcome, xml) = convert_strict("1..1\nok 1 - fine\n");

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(outcome.exit_code(), 0);
    assert!(xml.contains("status=\"pass\""));
}

#[test]
fn attribute_values_are_escaped() {
    let (_, xml) = convert("1..1\nnot ok 1 - a < b & \"c\"\n", "Suite <&>");

    assert!(xml.contains("name=\"Suite &lt;&amp;&gt;\""));
    assert!(xml.contains("name=\"1 a &lt; b &amp; &quot;c&quot;\""));
    assert!(xml.contains("message=\"not ok 1 - a &lt; b &amp; &quot;c&quot;\""));
}
