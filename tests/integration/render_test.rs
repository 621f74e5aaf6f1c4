use std::collections::BTreeMap;
use std::fs;

use carbon_survey::error::SurveyError;
use carbon_survey::models::{Category, Level};
use carbon_survey::pipeline::{ChartJob, default_chart_plan, run_visualizations};
use carbon_survey::render::TickLabels;
use carbon_survey::{
    Covariate, LayoutStyle, LayoutVariant, PercentageTable, Support, SurveyConfig, aggregate,
    layout_bars,
};

use crate::utils::{Respondent, recoded, temp_path};

fn political_rows() -> Vec<Respondent> {
    let mut rows = Vec::new();
    for (political, supports) in [
        (1.0, [3, 3, 3, 2]),
        (2.0, [3, 2, 2, 1]),
        (3.0, [2, 2, 1, 3]),
        (4.0, [1, 1, 2, 3]),
        (5.0, [1, 1, 1, 1]),
    ] {
        for support in supports {
            rows.push(Respondent::canada(support).political(political));
        }
    }
    rows
}

/// Every stack ends at its offset plus 100
#[test]
fn test_offset_invariant() {
    let counts = aggregate(&recoded(&political_rows()), Covariate::PoliticalOrientation).unwrap();
    let layout = layout_bars(&counts.percentages(), &counts).unwrap();

    assert_eq!(layout.bars.len(), 5);
    for bar in &layout.bars {
        let [not_at_all, moderately, _] = bar.segments;
        assert!((bar.offset + not_at_all.height + moderately.height / 2.0).abs() < 1e-9);
        assert!((bar.top() - (bar.offset + 100.0)).abs() < 1e-9);
        assert_eq!(bar.count, 4);
        assert!(bar.offset >= layout.y_range.0);
        assert!(bar.top() <= layout.y_range.1);
    }

    // Everyone at 5 said "Not at all": the bar hangs entirely below zero
    let last = &layout.bars[4];
    assert!((last.offset + 100.0).abs() < 1e-9);
    assert_eq!(last.segments[0].label(), "100%");
    assert!((layout.y_range.0 + 105.0).abs() < 1e-9);
}

/// The political chart names only the ends of the scale
#[test]
fn test_political_tick_names() {
    let counts = aggregate(&recoded(&political_rows()), Covariate::PoliticalOrientation).unwrap();
    let layout = layout_bars(&counts.percentages(), &counts).unwrap();
    let ticks = TickLabels::political_scale();

    let names: Vec<String> = layout
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let [group, count] = bar.tick_label();
            format!("{}\n{count}", ticks.name(i, layout.bars.len(), &group))
        })
        .collect();
    assert_eq!(names[0], "Strongly Liberal\nN = 4");
    assert_eq!(names[2], "-\nN = 4");
    assert_eq!(names[4], "Strongly Conservative\nN = 4");
}

/// A row without a "Very much" share cannot be drawn
#[test]
fn test_missing_category_is_render_error() {
    let counts = aggregate(&recoded(&political_rows()), Covariate::PoliticalOrientation).unwrap();
    let shares = BTreeMap::from([(Support::NotAtAll, 50.0), (Support::Moderately, 50.0)]);
    let percentages = PercentageTable::from_rows(
        "Political Orientation",
        vec![(Category::new(Level::Numeric(1.0)), shares)],
    );

    let err = layout_bars(&percentages, &counts).unwrap_err();
    assert!(matches!(
        err,
        SurveyError::Render { ref group, ref category } if group == "1" && category == "Very much"
    ));
}

/// A chart without data fails on its own; the rest of the set is still written
#[test]
fn test_one_failed_chart_does_not_block_others() {
    let rows: Vec<Respondent> = political_rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let even = i % 2 == 0;
            row.sex(if even { "0" } else { "1" })
                .residence(if i % 3 == 0 { "0" } else { "1" })
                .education(["1", "2", "3", "4"][i % 4])
                .age((i % 5 + 1) as f64)
        })
        .collect();
    let dataset = recoded(&rows);

    // Nobody reported an income
    let mut plan = default_chart_plan();
    plan.insert(
        1,
        ChartJob::new(
            Covariate::Income,
            "income.png",
            LayoutStyle::new(LayoutVariant::Side, (600, 400)),
            (0.25, 0.9),
        ),
    );

    let output_dir = temp_path("figures");
    let summary =
        run_visualizations(&dataset, &SurveyConfig::default(), &plan, &output_dir).unwrap();

    assert!(!summary.is_complete());
    assert_eq!(summary.failed.len(), 1);
    let (artifact, err) = &summary.failed[0];
    assert_eq!(artifact, "income.png");
    assert!(matches!(err, SurveyError::EmptyGroup { field } if field == "Income (CAD)"));
    assert!(!output_dir.join("income.png").exists());

    let expected = [
        "conservative.svg",
        "age.png",
        "urban.png",
        "education.png",
        "legend.svg",
    ];
    assert_eq!(summary.written.len(), expected.len());
    for name in expected {
        let path = output_dir.join(name);
        assert!(summary.written.contains(&path), "{name} not reported");
        let size = fs::metadata(&path).unwrap().len();
        assert!(size > 0, "{name} is empty");
    }

    fs::remove_dir_all(&output_dir).unwrap();
}
