use crate::jssp::Time;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

/// An operation placed on a machine row of a Gantt chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GanttTask {
    pub job: usize,
    pub position: usize,
    pub start: Time,
    pub duration: Time,
}

impl GanttTask {
    pub fn end(&self) -> Time {
        self.start + self.duration
    }
}

/// One row of tasks per machine, every row sorted by start time.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttChart {
    rows: Vec<Vec<GanttTask>>,
}

impl GanttChart {
    pub fn new(machines: usize) -> Self {
        GanttChart {
            rows: vec![Vec::new(); machines],
        }
    }

    /// Adds a task to the row of machine and keeps the row sorted by start time.
    pub fn add_task(&mut self, machine: usize, task: GanttTask) {
        let row = &mut self.rows[machine];
        let idx = row.partition_point(|other| other.start <= task.start);
        row.insert(idx, task);
    }

    pub fn machine_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, machine: usize) -> &[GanttTask] {
        &self.rows[machine]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[GanttTask]> + '_ {
        self.rows.iter().map(|row| row.as_slice())
    }

    /// Returns an iterator over all tasks together with their machine.
    pub fn iter_tasks(&self) -> impl Iterator<Item = (usize, &GanttTask)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(machine, row)| row.iter().map(move |task| (machine, task)))
    }

    /// Returns the time at which all tasks are finished, which is the makespan.
    pub fn end_time(&self) -> Time {
        self.rows
            .iter()
            .filter_map(|row| row.last())
            .map(GanttTask::end)
            .max()
            .unwrap_or(0)
    }

    /// Returns true if no two tasks overlap on a machine and every job runs its
    /// operations in order, each one starting after its predecessor ended.
    pub fn is_valid(&self) -> bool {
        let mut by_job: BTreeMap<usize, Vec<&GanttTask>> = BTreeMap::new();

        for row in self.rows.iter() {
            for (task, next) in row.iter().zip(row.iter().skip(1)) {
                if task.end() > next.start {
                    return false;
                }
            }
            for task in row.iter() {
                by_job.entry(task.job).or_default().push(task);
            }
        }

        for tasks in by_job.values_mut() {
            tasks.sort_by_key(|task| task.position);
            for (task, next) in tasks.iter().zip(tasks.iter().skip(1)) {
                if task.position == next.position || task.end() > next.start {
                    return false;
                }
            }
        }

        true
    }
}

fn job_symbol(job: usize) -> char {
    std::char::from_digit((job % 36) as u32, 36).unwrap_or('#')
}

impl Display for GanttChart {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (machine, row) in self.rows.iter().enumerate() {
            let mut line = String::new();
            for task in row.iter() {
                while line.len() < task.start as usize {
                    line.push(' ');
                }
                for _ in 0..task.duration {
                    line.push(job_symbol(task.job));
                }
            }
            if machine + 1 < self.rows.len() {
                writeln!(f, "{}", line)?;
            } else {
                write!(f, "{}", line)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(job: usize, position: usize, start: Time, duration: Time) -> GanttTask {
        GanttTask {
            job,
            position,
            start,
            duration,
        }
    }

    fn valid_chart() -> GanttChart {
        let mut chart = GanttChart::new(2);
        chart.add_task(0, task(0, 0, 0, 3));
        chart.add_task(1, task(1, 0, 0, 2));
        chart.add_task(1, task(0, 1, 3, 2));
        chart.add_task(0, task(1, 1, 3, 4));
        chart
    }

    #[test]
    fn add_task_keeps_rows_sorted() {
        let mut chart = GanttChart::new(1);
        chart.add_task(0, task(0, 1, 5, 1));
        chart.add_task(0, task(1, 0, 0, 2));
        chart.add_task(0, task(2, 0, 2, 3));

        let starts: Vec<Time> = chart.row(0).iter().map(|t| t.start).collect();
        assert_eq!(starts, vec![0, 2, 5]);
    }

    #[test]
    fn end_time_works() {
        assert_eq!(valid_chart().end_time(), 7);
        assert_eq!(GanttChart::new(3).end_time(), 0);
    }

    #[test]
    fn valid_chart_is_valid() {
        assert!(valid_chart().is_valid());
    }

    #[test]
    fn machine_overlap_is_invalid() {
        let mut chart = GanttChart::new(1);
        chart.add_task(0, task(0, 0, 0, 3));
        chart.add_task(0, task(1, 0, 2, 3));

        assert!(!chart.is_valid(), "Overlapping tasks on a machine were accepted.");
    }

    #[test]
    fn job_overlap_is_invalid() {
        let mut chart = GanttChart::new(2);
        chart.add_task(0, task(0, 0, 0, 3));
        chart.add_task(1, task(0, 1, 2, 3));

        assert!(!chart.is_valid(), "A job ran two operations at once.");
    }

    #[test]
    fn display_works() {
        assert_eq!(format!("{}", valid_chart()), "0001111\n11 00");
    }
}
