//! Rendering of `date` and `split` output.

use jmig_cli::render::{render_candidates, render_outcome};
use jmig_fields::{Disambiguator, default_table};
use jmig_model::SchemaRegistry;
use jmig_temporal::{FormatSpec, candidate};

fn split(schema: &str, raw: &str) -> String {
    let registry = SchemaRegistry::builtin();
    let schema = registry.get(schema).unwrap().clone();
    let splitter = Disambiguator::new(schema, default_table()).unwrap();
    render_outcome(&splitter.disambiguate(raw))
}

#[test]
fn date_table() {
    let format = FormatSpec::round_trip();
    let candidates: Vec<_> = ["06/08/2020 18:34", "not-a-date", "44287.3166666667"]
        .iter()
        .map(|value| candidate(value, &format))
        .collect();

    insta::assert_snapshot!(render_candidates(&candidates), @r"
    06/08/2020 18:34  numeric-twenty-four-hour        08/06/2020_18:34
    not-a-date        -                               unrecognized
    44287.3166666667  serial-date                     01/04/2021_07:36
    ");
}

#[test]
fn resolved_comment() {
    insta::assert_snapshot!(split("Comment", "2021-05-01;jdoe;Said: hi; bye"), @r"
    resolved (1 delimiter escaped)
      datetime  datetime  2021-05-01
      username  username  jdoe
      comment   text      Said: hi%3b bye
    field: 2021-05-01;jdoe;Said: hi%3b bye
    ");
}

#[test]
fn recovered_attachment() {
    insta::assert_snapshot!(
        split("Attachment", "2021-05-01;report.txt;http://server/path/report.txt"),
        @r"
    resolved (recovered by missing-username-attachment)
      datetime  datetime  2021-05-01
      username  username  Unknown
      filename  filename  report.txt
      location  location  http://server/path/report.txt
    field: 2021-05-01;Unknown;report.txt;http://server/path/report.txt
    "
    );
}

#[test]
fn ambiguous_comment() {
    insta::assert_snapshot!(split("Comment", "2021-05-01;Said: hi; bye;jdoe"), @r"
    ambiguous: username is not a valid username
      best effort: 2021-05-01;Said: hi; bye%3bjdoe
    ");
}

#[test]
fn short_work_log() {
    insta::assert_snapshot!(split("Log Work", "hello"), @r"
    needs input: found 1 of 4 values (comment;datetime;username;seconds) and no recovery rule applies
      [0] hello
    ");
}

#[test]
fn outcome_json() {
    let registry = SchemaRegistry::builtin();
    let schema = registry.get("logwork").unwrap().clone();
    let outcome = Disambiguator::new(schema, default_table())
        .unwrap()
        .disambiguate("Fixed it; finally;2021-05-01;jdoe;3600");
    insta::assert_json_snapshot!(outcome, @r#"
    {
      "status": "resolved",
      "values": [
        {
          "field_name": "comment",
          "field_type": "text",
          "value": "Fixed it%3b finally",
          "escaped": true
        },
        {
          "field_name": "datetime",
          "field_type": "datetime",
          "value": "2021-05-01",
          "escaped": false
        },
        {
          "field_name": "username",
          "field_type": "username",
          "value": "jdoe",
          "escaped": false
        },
        {
          "field_name": "seconds",
          "field_type": "integer",
          "value": "3600",
          "escaped": false
        }
      ],
      "repair": {
        "kind": "escaped",
        "count": 1
      }
    }
    "#);
}
