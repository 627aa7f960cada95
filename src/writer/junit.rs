//! [JUnit XML report][1] rendering.
//!
//! [1]: https://llg.cubic.org/docs/junit

use std::io;

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, Event},
    Writer,
};

use crate::report::{DetailKind, Report, Suite, TestCase};

/// [JUnit XML report][1] writer outputting a [`Report`] tree into an
/// [`io::Write`] implementor.
///
/// Output is pretty-printed with two-space indentation. Attribute values are
/// XML-escaped by the underlying serializer.
///
/// [1]: https://llg.cubic.org/docs/junit
pub struct JUnit<Out: io::Write> {
    /// Underlying XML serializer.
    writer: Writer<Out>,
}

impl<Out: io::Write> JUnit<Out> {
    /// Creates a new [`JUnit`] writer outputting into the given `output`.
    #[must_use]
    pub fn new(output: Out) -> Self {
        Self {
            writer: Writer::new_with_indent(output, b' ', 2),
        }
    }

    /// Writes the whole `report` as one complete XML document, handing the
    /// output sink back once it is fully written.
    pub fn write(mut self, report: &Report) -> Result<Out, quick_xml::Error> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.writer
            .write_event(Event::Start(BytesStart::new("testsuites")))?;
        for suite in &report.suites {
            self.write_suite(suite)?;
        }
        self.writer
            .write_event(Event::End(BytesEnd::new("testsuites")))?;

        let mut output = self.writer.into_inner();
        output.write_all(b"\n")?;
        Ok(output)
    }

    /// Writes one `<testsuite>` element with its cases.
    fn write_suite(&mut self, suite: &Suite) -> Result<(), quick_xml::Error> {
        let mut el = BytesStart::new("testsuite");
        el.push_attribute(("name", suite.name.as_str()));
        el.push_attribute(("tests", suite.tests.to_string().as_str()));
        el.push_attribute(("failures", suite.failures.to_string().as_str()));
        el.push_attribute(("errors", suite.errors.to_string().as_str()));
        el.push_attribute(("skipped", suite.skipped.to_string().as_str()));
        el.push_attribute(("todo", suite.todo.to_string().as_str()));
        el.push_attribute(("time", "0"));
        el.push_attribute(("id", suite.id.to_string().as_str()));
        self.writer.write_event(Event::Start(el))?;
        for case in &suite.cases {
            self.write_case(case)?;
        }
        self.writer
            .write_event(Event::End(BytesEnd::new("testsuite")))
    }

    /// Writes one `<testcase>` element, nesting its `<failure>`/`<error>`
    /// detail when present.
    fn write_case(&mut self, case: &TestCase) -> Result<(), quick_xml::Error> {
        let mut el = BytesStart::new("testcase");
        el.push_attribute(("name", case.name.as_str()));
        el.push_attribute(("status", case.status.as_str()));
        el.push_attribute(("classname", case.classname.as_str()));
        el.push_attribute(("time", "0"));

        let Some(detail) = &case.detail else {
            return self.writer.write_event(Event::Empty(el));
        };

        self.writer.write_event(Event::Start(el))?;
        let tag = match detail.kind {
            DetailKind::Failure => "failure",
            DetailKind::Error => "error",
        };
        let mut nested = BytesStart::new(tag);
        nested.push_attribute(("type", detail.ty.as_str()));
        nested.push_attribute(("message", detail.message.as_str()));
        self.writer.write_event(Event::Empty(nested))?;
        self.writer
            .write_event(Event::End(BytesEnd::new("testcase")))
    }
}

/// Splits `]]>` occurrences so the text could be embedded into a CDATA
/// section verbatim.
///
/// Nothing in the current output path produces CDATA; this is an extension
/// point for an eventual `<system-out>` element carrying raw TAP text.
#[must_use]
pub fn defang_cdata(text: &str) -> String {
    text.replace("]]>", "]]]]><![CDATA[>")
}

#[cfg(test)]
mod spec {
    use crate::report::{Detail, Status};

    use super::*;

    fn render(report: &Report) -> String {
        let out = JUnit::new(Vec::new()).write(report).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_empty_suite() {
        let report = Report {
            suites: vec![Suite {
                name: "empty".into(),
                tests: 0,
                failures: 0,
                errors: 0,
                skipped: 0,
                todo: 0,
                id: 1,
                cases: vec![],
            }],
        };

        assert_eq!(
            render(&report),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <testsuites>\n  \
               <testsuite name=\"empty\" tests=\"0\" failures=\"0\" \
                 errors=\"0\" skipped=\"0\" todo=\"0\" time=\"0\" id=\"1\">\n  \
               </testsuite>\n\
             </testsuites>\n",
        );
    }

    #[test]
    fn escapes_attribute_values() {
        let report = Report {
            suites: vec![Suite {
                name: "escaping".into(),
                tests: 1,
                failures: 1,
                errors: 0,
                skipped: 0,
                todo: 0,
                id: 1,
                cases: vec![TestCase {
                    name: "1 a < b & \"c\"".into(),
                    classname: "escaping.1-a-b-c".into(),
                    status: Status::Fail,
                    detail: Some(Detail {
                        kind: DetailKind::Failure,
                        ty: "TAPTestFailed".into(),
                        message: "not ok 1 - a < b & \"c\"".into(),
                    }),
                }],
            }],
        };

        let xml = render(&report);
        assert!(xml.contains("name=\"1 a &lt; b &amp; &quot;c&quot;\""));
        assert!(xml.contains("message=\"not ok 1 - a &lt; b &amp; &quot;c&quot;\""));
        assert!(!xml.contains("a < b"));
    }

    #[test]
    fn failure_and_error_render_as_distinct_elements() {
        let case = |kind, ty: &str| TestCase {
            name: "x".into(),
            classname: "s.x".into(),
            status: Status::Fail,
            detail: Some(Detail {
                kind,
                ty: ty.into(),
                message: "m".into(),
            }),
        };
        let report = Report {
            suites: vec![Suite {
                name: "s".into(),
                tests: 2,
                failures: 1,
                errors: 1,
                skipped: 0,
                todo: 0,
                id: 1,
                cases: vec![
                    case(DetailKind::Failure, "TAPTestFailed"),
                    case(DetailKind::Error, "TAPParseError"),
                ],
            }],
        };

        let xml = render(&report);
        assert!(xml.contains("<failure type=\"TAPTestFailed\" message=\"m\"/>"));
        assert!(xml.contains("<error type=\"TAPParseError\" message=\"m\"/>"));
    }

    #[test]
    fn defangs_cdata_terminators() {
        assert_eq!(defang_cdata("plain"), "plain");
        assert_eq!(defang_cdata("a ]]> b"), "a ]]]]><![CDATA[> b");
    }
}
