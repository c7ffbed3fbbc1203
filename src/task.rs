use anyhow::{Context, Result};
use console::{style, Term};
use std::process::Command;
use std::time::Instant;

pub struct TaskRunner {
    term: Term,
    num_tasks: u32,
    current_task: u32,
    now: Instant,
    descr: String,
    verbose: bool,
}

impl TaskRunner {
    pub fn new(num_tasks: u32, verbose: bool) -> Self {
        Self {
            term: Term::stdout(),
            num_tasks,
            current_task: 0,
            now: Instant::now(),
            descr: "".into(),
            verbose,
        }
    }

    fn task_id(&self) -> String {
        style(format!("[{}/{}]", self.current_task + 1, self.num_tasks))
            .force_styling(true)
            .to_string()
    }

    pub fn start_task(&mut self, descr: impl Into<String>) {
        self.now = Instant::now();
        self.descr = descr.into();
        println!("{} {}", self.task_id(), &self.descr);
    }

    pub fn end_task(&mut self) {
        if !self.verbose {
            self.term.clear_last_lines(1).ok();
        }
        let time = self.now.elapsed();
        println!("{} {} [{}ms]", self.task_id(), &self.descr, time.as_millis());
        self.current_task += 1;
    }
}

pub fn run(command: &mut Command) -> Result<()> {
    fn format_error(command: &Command, status: Option<i32>) -> String {
        let status = if let Some(code) = status {
            format!(" exited with {code}")
        } else {
            Default::default()
        };
        format!("{} `{:?}`{}", style("[ERROR]").red(), command, status)
    }
    let status = command
        .status()
        .with_context(|| format_error(command, None))?;
    if !status.success() {
        anyhow::bail!("{}", format_error(command, status.code()));
    }
    Ok(())
}
