//! Function Planner
//!
//! Builds the execution plan by filtering the function catalogue.
//!
//! Filtering: regex pattern matching on the function name.
//!
//! Ordering: functions keep their declaration order, which is also report order.

use approxbench_core::FunctionUnderTest;
use regex::Regex;

/// Execution plan for a run
pub struct ExecutionPlan {
    /// Ordered list of functions to run
    pub functions: Vec<FunctionUnderTest>,
}

/// Build execution plan from the catalogue
pub fn build_plan(
    functions: impl IntoIterator<Item = FunctionUnderTest>,
    filter: Option<&Regex>,
) -> ExecutionPlan {
    let selected = functions
        .into_iter()
        .filter(|f| filter.is_none_or(|re| re.is_match(&f.name)))
        .collect();

    ExecutionPlan {
        functions: selected,
    }
}

impl ExecutionPlan {
    /// Tree listing used by `list` and `--dry-run`
    pub fn describe(&self) -> String {
        let mut output = String::from("approxbench Plan:\n");

        for function in &self.functions {
            let negatives = if function.allows_negatives {
                ", negatives"
            } else {
                ""
            };
            output.push_str(&format!(
                "├── {} ({}{}) [{:e}..{:e}]\n",
                function.name,
                function.kernel.mode(),
                negatives,
                function.range.min,
                function.range.max
            ));
        }

        output.push_str(&format!("{} functions found.\n", self.functions.len()));
        output
    }
}
