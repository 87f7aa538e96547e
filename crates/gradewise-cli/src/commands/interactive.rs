//! The `gradewise interactive` command.
//!
//! Walks the wizard over stdin/stdout. Field prompts accept `:command` to
//! leave the current step; the review prompt takes commands without the
//! colon. Rejected actions are reported through the presenter, so their
//! errors are dropped here.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::Result;

use gradewise_core::animation::{frames, tick_interval};
use gradewise_core::engine::round_to;
use gradewise_core::model::{CgpaSummary, Course, Step};
use gradewise_core::presenter::{CourseListView, Notice, NoticeKind, Presenter};
use gradewise_core::theme::{PreferenceStore, Theme};
use gradewise_core::wizard::WizardController;
use gradewise_report::ResultsView;

use super::cgpa::print_summary;
use crate::config::{load_config_from, open_preferences};

const HELP: &str = "\
Commands (prefix with ':' at a field prompt):
  add          start a new course
  back         go to the previous step
  cancel       discard the course being entered
  list         show the course list
  delete N     remove course N
  calc         calculate the CGPA
  reset        clear every course
  theme        toggle the dark/light theme
  help         show this help
  quit         leave";

pub fn execute(no_animation: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let prefs = open_preferences(&config)?;

    let presenter = TerminalPresenter {
        animate: config.animation && !no_animation && io::stdout().is_terminal(),
    };
    let wizard =
        WizardController::with_assignment_fields(Box::new(presenter), config.assignment_fields);

    println!(
        "gradewise: grade and CGPA calculator (theme: {}). Type :help for commands.",
        Theme::load(&*prefs)
    );

    let mut session = Session {
        wizard,
        prefs,
        input: io::stdin().lock(),
        quit: false,
    };
    session.run()
}

/// Draws wizard output as plain terminal text.
struct TerminalPresenter {
    animate: bool,
}

impl Presenter for TerminalPresenter {
    fn on_step_changed(&self, step: Step) {
        println!(
            "\n== Step {} of {}: {} ==",
            step.number(),
            Step::ALL.len(),
            step.title()
        );
    }

    fn on_course_list(&self, view: &CourseListView) {
        print_course_list(view);
    }

    fn on_notice(&self, notice: &Notice) {
        print_notice(notice);
    }

    fn on_results(&self, summary: &CgpaSummary, courses: &[Course]) {
        if self.animate {
            count_up(round_to(summary.cgpa, 2));
        }
        print_summary(&ResultsView::new(summary, courses).with_title("Your CGPA"));
    }
}

fn print_notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Success => println!("[ok] {}", notice.message),
        NoticeKind::Error => println!("[error] {}", notice.message),
    }
}

fn print_course_list(view: &CourseListView) {
    use comfy_table::{Cell, Table};

    if view.empty {
        println!("No courses added yet.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Course", "Credits", "Score", "Grade", "Points"]);
    for entry in &view.entries {
        table.add_row(vec![
            Cell::new(entry.index + 1),
            Cell::new(&entry.name),
            Cell::new(entry.credits),
            Cell::new(&entry.score),
            Cell::new(entry.grade),
            Cell::new(entry.points),
        ]);
    }
    println!("{table}");

    if view.calculate_enabled {
        println!("Type `calc` to calculate your CGPA, or `add` for another course.");
    }
}

fn count_up(target: f64) {
    let mut stdout = io::stdout();
    for frame in frames(target) {
        print!("\rCGPA: {:.2}", frame.value);
        // Best effort; a broken terminal only loses the animation.
        stdout.flush().ok();
        if !frame.done {
            thread::sleep(tick_interval());
        }
    }
    println!();
}

struct Session<R> {
    wizard: WizardController,
    prefs: Box<dyn PreferenceStore>,
    input: R,
    quit: bool,
}

impl<R: BufRead> Session<R> {
    fn run(&mut self) -> Result<()> {
        self.wizard.start();

        while !self.quit {
            match self.wizard.step() {
                Step::CourseInfo => self.course_info_step()?,
                Step::Assignments => self.assignments_step()?,
                Step::Exams => self.exams_step()?,
                Step::Review => self.review_step()?,
            }
        }

        println!("Goodbye.");
        Ok(())
    }

    fn course_info_step(&mut self) -> Result<()> {
        let Some(name) = self.field("Course name")? else {
            return Ok(());
        };
        let Some(credits) = self.field("Credits (1-10)")? else {
            return Ok(());
        };

        let form = self.wizard.form_mut();
        form.course_name = name;
        form.credits = credits;
        self.wizard.go_to(Step::Assignments).ok();
        Ok(())
    }

    fn assignments_step(&mut self) -> Result<()> {
        for i in 0..self.wizard.form().assignments.len() {
            let Some(score) = self.field(&format!("Assignment {} (blank = 0)", i + 1))? else {
                return Ok(());
            };
            self.wizard.form_mut().set_assignment(i, score);
        }

        self.wizard.go_to(Step::Exams).ok();
        Ok(())
    }

    fn exams_step(&mut self) -> Result<()> {
        let Some(quiz1) = self.field("Quiz 1 (0-100)")? else {
            return Ok(());
        };
        let Some(quiz2) = self.field("Quiz 2 (0-100)")? else {
            return Ok(());
        };
        let Some(final_exam) = self.field("Final exam (0-100)")? else {
            return Ok(());
        };

        let form = self.wizard.form_mut();
        form.quiz1 = quiz1;
        form.quiz2 = quiz2;
        form.final_exam = final_exam;
        self.wizard.add_course().ok();
        Ok(())
    }

    fn review_step(&mut self) -> Result<()> {
        match self.read_line("gradewise> ")? {
            Some(line) => self.command(line.trim().trim_start_matches(':')),
            None => {
                self.quit = true;
                Ok(())
            }
        }
    }

    /// Prompt for a field value.
    ///
    /// Returns `None` when the step was interrupted by a command or the end
    /// of input, in which case the caller should return to the main loop.
    fn field(&mut self, label: &str) -> Result<Option<String>> {
        let Some(line) = self.read_line(&format!("{label}: "))? else {
            self.quit = true;
            return Ok(None);
        };

        if let Some(cmd) = line.trim().strip_prefix(':') {
            self.command(cmd.trim())?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn command(&mut self, line: &str) -> Result<()> {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Ok(());
        };

        match cmd {
            "add" => {
                self.wizard.go_to(Step::CourseInfo).ok();
            }
            "back" => match Step::from_number(self.wizard.step().number() - 1) {
                Some(prev) => {
                    self.wizard.go_to(prev).ok();
                }
                None => println!("Already at the first step."),
            },
            "cancel" => self.wizard.cancel_course(),
            "list" => print_course_list(&CourseListView::from_courses(self.wizard.store().list())),
            "calc" => {
                self.wizard.calculate().ok();
            }
            "delete" | "rm" => self.delete(parts.next())?,
            "reset" => self.reset()?,
            "theme" => {
                let theme = Theme::toggle(&mut *self.prefs)?;
                println!("Theme: {theme}");
            }
            "help" | "?" => println!("{HELP}"),
            "quit" | "exit" | "q" => self.quit = true,
            other => print_notice(&Notice::error(format!(
                "unknown command: {other} (type :help)"
            ))),
        }

        Ok(())
    }

    fn delete(&mut self, arg: Option<&str>) -> Result<()> {
        let Some(position) = arg.and_then(|a| a.parse::<usize>().ok()).filter(|&n| n > 0) else {
            print_notice(&Notice::error("usage: delete N (N is the course number)"));
            return Ok(());
        };

        if position > self.wizard.store().count() {
            print_notice(&Notice::error(format!("there is no course {position}")));
            return Ok(());
        }
        let Ok(intent) = self.wizard.request_delete(position - 1) else {
            return Ok(());
        };
        if self.confirm(&intent.prompt())? {
            self.wizard.confirm_delete(intent).ok();
        } else {
            println!("Deletion cancelled.");
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        if self.wizard.store().is_empty() {
            print_notice(&Notice::error("calculator is already empty"));
            return Ok(());
        }
        if self.confirm("Are you sure you want to start over? All data will be lost.")? {
            self.wizard.reset();
        }
        Ok(())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        match self.read_line(&format!("{prompt} [y/N] "))? {
            Some(answer) => Ok(matches!(
                answer.trim().to_lowercase().as_str(),
                "y" | "yes"
            )),
            None => {
                self.quit = true;
                Ok(false)
            }
        }
    }

    /// Print `prompt` and read one line. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradewise_core::presenter::{PresenterEvent, RecordingPresenter};
    use gradewise_core::theme::{MemoryPreferences, THEME_KEY};
    use std::io::Cursor;

    fn session(script: &str, fields: usize) -> (Session<Cursor<Vec<u8>>>, RecordingPresenter) {
        let presenter = RecordingPresenter::new();
        let wizard = WizardController::with_assignment_fields(Box::new(presenter.clone()), fields);
        let session = Session {
            wizard,
            prefs: Box::new(MemoryPreferences::new()),
            input: Cursor::new(script.as_bytes().to_vec()),
            quit: false,
        };
        (session, presenter)
    }

    #[test]
    fn full_course_then_quit() {
        let (mut s, presenter) = session("Math\n3\n80\n\n50\n90\n70\nquit\n", 2);
        s.run().unwrap();

        assert_eq!(s.wizard.store().count(), 1);
        let course = s.wizard.store().get(0).unwrap();
        assert_eq!(course.assignments(), &[80.0, 0.0]);
        assert_eq!(course.total_score_display(), "65.80");
        assert_eq!(
            presenter.last_notice(),
            Some(Notice::success("course added successfully"))
        );
        assert_eq!(s.wizard.step(), Step::Review);
    }

    #[test]
    fn rejected_course_info_repeats_step() {
        let (mut s, presenter) = session("  \n3\nMath\n11\n", 1);
        s.run().unwrap();

        assert_eq!(s.wizard.step(), Step::CourseInfo);
        let errors = presenter
            .events()
            .into_iter()
            .filter(|e| matches!(e, PresenterEvent::Notice(n) if n.kind == NoticeKind::Error))
            .count();
        assert_eq!(errors, 2);
        assert!(s.quit);
    }

    #[test]
    fn colon_back_returns_to_previous_step() {
        let (mut s, _) = session("Math\n3\n:back\n", 2);
        s.run().unwrap();
        assert_eq!(s.wizard.step(), Step::CourseInfo);
        assert_eq!(s.wizard.draft().draft().name.as_deref(), Some("Math"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let script = "A\n2\n10\n10\n10\n10\ndelete 1\nn\ndelete 1\ny\nquit\n";
        let (mut s, presenter) = session(script, 1);
        s.run().unwrap();

        assert!(s.wizard.store().is_empty());
        assert_eq!(presenter.last_notice(), Some(Notice::success("course removed")));
        assert!(presenter.last_course_list().unwrap().empty);
    }

    #[test]
    fn reset_on_empty_calculator_does_nothing() {
        let (mut s, presenter) = session(":reset\n", 1);
        s.run().unwrap();
        assert!(presenter.last_notice().is_none());
        assert!(s.wizard.store().is_empty());
    }

    #[test]
    fn calc_and_theme_commands() {
        let script = "A\n2\n10\n10\n10\n10\ncalc\ntheme\nquit\n";
        let (mut s, presenter) = session(script, 1);
        s.run().unwrap();

        assert!(presenter
            .events()
            .iter()
            .any(|e| matches!(e, PresenterEvent::Results(summary) if summary.course_count == 1)));
        assert_eq!(s.prefs.get(THEME_KEY).as_deref(), Some("light"));
    }
}
