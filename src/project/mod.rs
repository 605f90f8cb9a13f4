// ==========================================
// EA Portal Data Core - project status deriver
// ==========================================
// Lifecycle status from progress pairs + display years from raw
// start/end dates. Status is gated on data completeness: both
// progress values must be numeric, otherwise the status is blank.
// ==========================================

use crate::dates::{format_ddmmyyyy, normalize_to_naive};
use crate::domain::project::{NormalizedProject, NormalizedStrategy};
use crate::domain::types::{ProjectStatus, RawRow};
use crate::normalize::{first_present, text_of};
use chrono::Datelike;
use std::collections::HashSet;

const NAME_KEYS: &[&str] = &["projectName", "Project Name", "name"];
const START_DATE_KEYS: &[&str] = &["startDate", "Start Date", "start_date"];
const END_DATE_KEYS: &[&str] = &["endDate", "End Date", "end_date"];
const LATEST_ACTUAL_KEYS: &[&str] = &["latestActual", "Latest Actual", "actual"];
const LATEST_TARGET_KEYS: &[&str] = &["latestTarget", "Latest Target", "target"];

const STRATEGY_NAME_KEYS: &[&str] = &["strategyName", "Strategy Name", "name"];
const STRATEGY_PROJECTS_KEYS: &[&str] = &["Projects", "projects"];

/// Status only when both progress values are numeric; equal means on
/// track, more actual than target means ahead.
pub fn compute_project_status(actual: Option<f64>, target: Option<f64>) -> ProjectStatus {
    match (actual, target) {
        (Some(actual), Some(target)) => {
            if actual == target {
                ProjectStatus::OnTrack
            } else if actual > target {
                ProjectStatus::Ahead
            } else {
                ProjectStatus::Delayed
            }
        }
        _ => ProjectStatus::Unknown,
    }
}

pub fn derive_project(row: &RawRow) -> NormalizedProject {
    let start = first_present(row, START_DATE_KEYS).and_then(normalize_to_naive);
    let end = first_present(row, END_DATE_KEYS).and_then(normalize_to_naive);

    let latest_actual = first_present(row, LATEST_ACTUAL_KEYS).and_then(|v| v.as_number());
    let latest_target = first_present(row, LATEST_TARGET_KEYS).and_then(|v| v.as_number());

    NormalizedProject {
        name: text_of(row, NAME_KEYS),
        start_date: start.map(format_ddmmyyyy),
        start_year: start.map(|d| d.year()),
        end_date: end.map(format_ddmmyyyy),
        end_year: end.map(|d| d.year()),
        latest_actual,
        latest_target,
        project_status: compute_project_status(latest_actual, latest_target),
    }
}

/// Usable project set: rows without a parseable start year are out.
/// Policy, not an error - year charts cannot place them.
pub fn usable_projects(projects: Vec<NormalizedProject>) -> Vec<NormalizedProject> {
    projects
        .into_iter()
        .filter(|p| p.start_year.is_some())
        .collect()
}

/// Count of unique project identifiers in a comma-separated cell.
pub fn unique_project_count(projects_cell: &str) -> usize {
    projects_cell
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

pub fn derive_strategy(row: &RawRow) -> NormalizedStrategy {
    let project_count = text_of(row, STRATEGY_PROJECTS_KEYS)
        .map(|cell| unique_project_count(&cell))
        .unwrap_or(0);

    NormalizedStrategy {
        name: text_of(row, STRATEGY_NAME_KEYS),
        project_count,
    }
}
