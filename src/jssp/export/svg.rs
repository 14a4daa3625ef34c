use crate::jssp::GanttChart;

use serde::Serialize;
use tera::Context;
use tera::Tera;

const TEMPLATE: &str = include_str!("../../templates/gantt.svg");
const LABEL_WIDTH: f64 = 100.0;
const TICKS: u32 = 10;

#[derive(Serialize)]
struct TaskShape {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: String,
    job: usize,
    position: usize,
}

#[derive(Serialize)]
struct MachineLabel {
    machine: usize,
    y: f64,
}

#[derive(Serialize)]
struct Tick {
    x: f64,
    time: u32,
}

/// Renders Gantt charts as SVG documents.
pub struct SVG {
    pub width: usize,
    pub height: usize,
    pub padding: usize,
}

impl Default for SVG {
    fn default() -> Self {
        SVG {
            width: 1200,
            height: 600,
            padding: 30,
        }
    }
}

fn job_color(job: usize) -> String {
    // golden angle steps keep neighbouring jobs apart
    format!("hsl({}, 65%, 70%)", (job * 137) % 360)
}

impl SVG {
    pub fn export_gantt_chart(&self, chart: &GanttChart, name: &str) -> Result<String, tera::Error> {
        let makespan = chart.end_time();
        let time_scale = self.width as f64 / f64::from(makespan.max(1));
        let row_height = self.height as f64 / chart.machine_count().max(1) as f64;
        let left = self.padding as f64 + LABEL_WIDTH;
        let top = self.padding as f64;

        let tasks: Vec<TaskShape> = chart
            .iter_tasks()
            .map(|(machine, task)| TaskShape {
                x: left + f64::from(task.start) * time_scale,
                y: top + machine as f64 * row_height,
                width: f64::from(task.duration) * time_scale,
                height: row_height,
                color: job_color(task.job),
                job: task.job + 1,
                position: task.position + 1,
            })
            .collect();

        let labels: Vec<MachineLabel> = (0..chart.machine_count())
            .map(|machine| MachineLabel {
                machine: machine + 1,
                y: top + (machine as f64 + 0.5) * row_height,
            })
            .collect();

        let step = (makespan / TICKS).max(1);
        let ticks: Vec<Tick> = (0..=makespan)
            .step_by(step as usize)
            .map(|time| Tick {
                x: left + f64::from(time) * time_scale,
                time,
            })
            .collect();

        let mut context = Context::new();
        context.insert("name", &name);
        context.insert("makespan", &makespan);
        context.insert("padding", &self.padding);
        context.insert("total_width", &(self.width + 2 * self.padding + LABEL_WIDTH as usize));
        context.insert("total_height", &(self.height + 2 * self.padding + 20));
        context.insert("axis_y", &(top + self.height as f64));
        context.insert("tasks", &tasks);
        context.insert("labels", &labels);
        context.insert("ticks", &ticks);

        Tera::one_off(TEMPLATE, &context, true)
    }
}
