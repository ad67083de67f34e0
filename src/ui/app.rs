use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{
    create_course, delete_course, enroll, fetch_courses, search_courses, unenroll, StoreError,
};
use crate::models::Course;

use super::forms::{
    ConfirmCourseDelete, CourseField, CourseForm, EnrollForm, EnrollPart, NameForm, SearchForm,
    SearchPart,
};
use super::helpers::{centered_rect, key_hint_line, surface_error};
use super::screens::{AdminScreen, Filter, LoginScreen, Role, StudentScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Column headings shared by the admin and student tables. Labels only; the
/// columns are not sortable.
const COURSE_COLUMNS: [&str; 4] = ["Code", "Name", "Faculty", "Fees"];

/// High-level navigation states. One active portal at a time, each carrying
/// its own screen state; logging out drops that state entirely.
enum Screen {
    Login(LoginScreen),
    Admin(AdminScreen),
    Student(StudentScreen),
}

/// Fine-grained modes scoped to the current screen. Every modal interaction
/// lives here so `Normal` keys never fire while a dialog is open.
enum Mode {
    Normal,
    AddingCourse(CourseForm),
    ConfirmCourseDelete(ConfirmCourseDelete),
    Searching(SearchForm),
    Enrolling(EnrollForm),
    Unenrolling(NameForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer. `Info` doubles as the informational
/// tone for not-found cases like unenrolling without an enrollment.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    conn: Connection,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            screen: Screen::Login(LoginScreen::default()),
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Route a key press to the active mode. Returns `true` when the
    /// application should exit.
    pub(crate) fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingCourse(form) => self.handle_add_course(code, form)?,
            Mode::ConfirmCourseDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::Searching(form) => self.handle_search(code, form)?,
            Mode::Enrolling(form) => self.handle_enroll(code, form)?,
            Mode::Unenrolling(form) => self.handle_unenroll(code, form)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Login(_) => self.handle_login_key(code, exit),
            Screen::Admin(_) => self.handle_admin_key(code),
            Screen::Student(_) => self.handle_student_key(code),
        }
    }

    fn handle_login_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => {
                if let Screen::Login(login) = &mut self.screen {
                    login.move_selection(-1);
                }
            }
            KeyCode::Down => {
                if let Screen::Login(login) = &mut self.screen {
                    login.move_selection(1);
                }
            }
            KeyCode::Enter => self.login(),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_admin_key(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Up => {
                if let Screen::Admin(admin) = &mut self.screen {
                    admin.move_selection(-1);
                }
            }
            KeyCode::Down => {
                if let Screen::Admin(admin) = &mut self.screen {
                    admin.move_selection(1);
                }
            }
            KeyCode::Char('a') => return Ok(Mode::AddingCourse(CourseForm::default())),
            KeyCode::Char('d') => {
                let confirm = if let Screen::Admin(admin) = &self.screen {
                    admin.current_course().map(ConfirmCourseDelete::from)
                } else {
                    None
                };
                return match confirm {
                    Some(confirm) => Ok(Mode::ConfirmCourseDelete(confirm)),
                    None => {
                        self.set_status("Please select a course to delete.", StatusKind::Error);
                        Ok(Mode::Normal)
                    }
                };
            }
            KeyCode::Char('s') => return Ok(Mode::Searching(SearchForm::default())),
            KeyCode::Char('c') => self.reload_admin_courses(),
            KeyCode::Esc => self.logout(),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_student_key(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Up => {
                if let Screen::Student(student) = &mut self.screen {
                    student.move_selection(-1);
                }
            }
            KeyCode::Down => {
                if let Screen::Student(student) = &mut self.screen {
                    student.move_selection(1);
                }
            }
            KeyCode::Char('e') => {
                let count = if let Screen::Student(student) = &self.screen {
                    student.courses.len()
                } else {
                    0
                };
                return Ok(Mode::Enrolling(EnrollForm::new(count)));
            }
            KeyCode::Char('u') => return Ok(Mode::Unenrolling(NameForm::default())),
            KeyCode::Char('r') => self.reload_student_courses(),
            KeyCode::Esc => self.logout(),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_course(&mut self, code: KeyCode, mut form: CourseForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab => form.toggle_field(),
            KeyCode::Backspace => {
                form.backspace();
                form.error = None;
            }
            KeyCode::Enter => match form.parse_inputs() {
                Err(err) => form.error = Some(err.to_string()),
                Ok((course_code, name, faculty, fees)) => {
                    match create_course(&self.conn, &course_code, &name, &faculty, &fees) {
                        Ok(course) => {
                            self.set_status(
                                format!("Course {} has been added successfully.", course.name),
                                StatusKind::Info,
                            );
                            self.reload_admin_courses();
                            return Ok(Mode::Normal);
                        }
                        // Duplicate code or a raw storage failure: either way
                        // the form keeps its values so nothing is retyped.
                        Err(err) => form.error = Some(surface_error(&err)),
                    }
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::AddingCourse(form))
    }

    fn handle_confirm_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmCourseDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                match delete_course(&self.conn, &confirm.code) {
                    Ok(()) => {
                        self.set_status(
                            format!("Course {} has been deleted successfully.", confirm.code),
                            StatusKind::Info,
                        );
                        self.reload_admin_courses();
                    }
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmCourseDelete(confirm)),
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut form: SearchForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab => form.toggle_part(),
            KeyCode::Left if form.active == SearchPart::Field => form.cycle_field(-1),
            KeyCode::Right if form.active == SearchPart::Field => form.cycle_field(1),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let pattern = form.pattern.trim().to_string();
                match search_courses(&self.conn, form.field, &pattern) {
                    Ok(courses) => {
                        if let Screen::Admin(admin) = &mut self.screen {
                            admin.show(
                                courses,
                                Some(Filter {
                                    field: form.field,
                                    pattern,
                                }),
                            );
                        }
                    }
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
                return Ok(Mode::Normal);
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::Searching(form))
    }

    fn handle_enroll(&mut self, code: KeyCode, mut form: EnrollForm) -> Result<Mode> {
        let course_count = if let Screen::Student(student) = &self.screen {
            student.courses.len()
        } else {
            0
        };

        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab => form.toggle_part(),
            KeyCode::Up if form.active == EnrollPart::Course => {
                form.move_selection(-1, course_count)
            }
            KeyCode::Down if form.active == EnrollPart::Course => {
                form.move_selection(1, course_count)
            }
            KeyCode::Backspace => {
                form.backspace();
                form.error = None;
            }
            KeyCode::Enter => {
                let parsed = if let Screen::Student(student) = &self.screen {
                    form.parse_inputs(&student.courses)
                } else {
                    return Ok(Mode::Normal);
                };
                match parsed {
                    Err(err) => form.error = Some(err.to_string()),
                    Ok((name, course_code)) => match enroll(&self.conn, &name, &course_code) {
                        Ok(enrollment) => {
                            let course_name = self.course_name_for(&enrollment.course_code);
                            self.set_status(
                                format!("{name} has enrolled in {course_name}."),
                                StatusKind::Info,
                            );
                            return Ok(Mode::Normal);
                        }
                        Err(err) => form.error = Some(surface_error(&err)),
                    },
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::Enrolling(form))
    }

    fn handle_unenroll(&mut self, code: KeyCode, mut form: NameForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Backspace => {
                form.backspace();
                form.error = None;
            }
            KeyCode::Enter => match form.parse_input() {
                Err(err) => form.error = Some(err.to_string()),
                Ok(name) => {
                    match unenroll(&self.conn, &name) {
                        Ok(()) => self.set_status(
                            format!("{name} has been unenrolled."),
                            StatusKind::Info,
                        ),
                        Err(err) => {
                            // Not being enrolled is informational, not a
                            // failure.
                            let kind = match err.downcast_ref::<StoreError>() {
                                Some(StoreError::NotEnrolled(_)) => StatusKind::Info,
                                _ => StatusKind::Error,
                            };
                            self.set_status(surface_error(&err), kind);
                        }
                    }
                    return Ok(Mode::Normal);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::Unenrolling(form))
    }

    /// Enter the portal matching the selected role, loading a fresh course
    /// listing on the way in.
    fn login(&mut self) {
        let role = if let Screen::Login(login) = &self.screen {
            login.selected_role()
        } else {
            return;
        };

        match fetch_courses(&self.conn) {
            Ok(courses) => {
                self.status = None;
                self.screen = match role {
                    Role::Administrator => Screen::Admin(AdminScreen::new(courses)),
                    Role::Student => Screen::Student(StudentScreen::new(courses)),
                };
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    /// Back to role selection. Any in-progress form input and footer status
    /// is discarded along with the portal state.
    fn logout(&mut self) {
        self.screen = Screen::Login(LoginScreen::default());
        self.status = None;
    }

    /// Reload the unfiltered catalog into the admin table, dropping any
    /// active search filter.
    fn reload_admin_courses(&mut self) {
        match fetch_courses(&self.conn) {
            Ok(courses) => {
                if let Screen::Admin(admin) = &mut self.screen {
                    admin.show(courses, None);
                }
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    /// Reload the course listing backing the student table and selector.
    fn reload_student_courses(&mut self) {
        match fetch_courses(&self.conn) {
            Ok(courses) => {
                if let Screen::Student(student) = &mut self.screen {
                    student.show(courses);
                }
                self.set_status("Course list refreshed.", StatusKind::Info);
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    /// Resolve a course code to its display name, falling back to the code
    /// itself when the course is not in the current listing.
    fn course_name_for(&self, course_code: &str) -> String {
        let courses = match &self.screen {
            Screen::Admin(admin) => &admin.courses,
            Screen::Student(student) => &student.courses,
            Screen::Login(_) => return course_code.to_string(),
        };
        courses
            .iter()
            .find(|course| course.code == course_code)
            .map(|course| course.name.clone())
            .unwrap_or_else(|| course_code.to_string())
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Login(login) => self.draw_login(frame, content_area, login),
            Screen::Admin(admin) => self.draw_admin(frame, content_area, admin),
            Screen::Student(student) => self.draw_student(frame, content_area, student),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingCourse(form) => self.draw_course_form(frame, area, form),
            Mode::ConfirmCourseDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Searching(form) => self.draw_search_form(frame, area, form),
            Mode::Enrolling(form) => self.draw_enroll_form(frame, area, form),
            Mode::Unenrolling(form) => self.draw_unenroll_form(frame, area, form),
            Mode::Normal => {}
        }
    }

    fn draw_login(&self, frame: &mut Frame, area: Rect, login: &LoginScreen) {
        let popup_area = centered_rect(40, 40, area);
        let block = Block::default()
            .title("Course Management Login")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let question = Paragraph::new("Are you an administrator or a student?")
            .wrap(Wrap { trim: true });
        frame.render_widget(question, chunks[0]);

        let items: Vec<ListItem> = Role::ALL
            .iter()
            .map(|role| ListItem::new(role.label()))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(login.selected));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_admin(&self, frame: &mut Frame, area: Rect, admin: &AdminScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let banner = match &admin.filter {
            Some(filter) => Line::from(vec![
                Span::raw("Filter: "),
                Span::styled(
                    format!("{} contains \"{}\"", filter.field.label(), filter.pattern),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled("   press 'c' to clear", Style::default().fg(Color::DarkGray)),
            ]),
            None => Line::from(Span::styled(
                "All courses",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(banner), chunks[0]);

        let empty_hint = if admin.filter.is_some() {
            "No courses match the search. Press 'c' to clear the filter."
        } else {
            "No courses yet. Press 'a' to add one."
        };
        self.draw_course_table(
            frame,
            chunks[1],
            "Courses (Administrator)",
            &admin.courses,
            admin.selected,
            empty_hint,
        );
    }

    fn draw_student(&self, frame: &mut Frame, area: Rect, student: &StudentScreen) {
        self.draw_course_table(
            frame,
            area,
            "Courses (Student)",
            &student.courses,
            student.selected,
            "No courses available yet. Check back after an administrator adds some.",
        );
    }

    fn draw_course_table(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        courses: &[Course],
        selected: usize,
        empty_hint: &str,
    ) {
        let block = Block::default().title(title.to_string()).borders(Borders::ALL);

        if courses.is_empty() {
            let message = Paragraph::new(empty_hint.to_string())
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(COURSE_COLUMNS.to_vec())
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = courses
            .iter()
            .map(|course| {
                Row::new(vec![
                    course.code.clone(),
                    course.name.clone(),
                    course.faculty.clone(),
                    course.fees.clone(),
                ])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Percentage(25); 4])
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = TableState::default();
        state.select(Some(selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match (&self.screen, &self.mode) {
            (_, Mode::AddingCourse(_)) => key_hint_line(&[
                ("Tab", "Next field"),
                ("Enter", "Save"),
                ("Esc", "Cancel"),
            ]),
            (_, Mode::ConfirmCourseDelete(_)) => {
                key_hint_line(&[("Y", "Delete"), ("N/Esc", "Cancel")])
            }
            (_, Mode::Searching(_)) => key_hint_line(&[
                ("Tab", "Switch"),
                ("←→", "Change field"),
                ("Enter", "Search"),
                ("Esc", "Cancel"),
            ]),
            (_, Mode::Enrolling(_)) => key_hint_line(&[
                ("Tab", "Switch"),
                ("↑↓", "Pick course"),
                ("Enter", "Enroll"),
                ("Esc", "Cancel"),
            ]),
            (_, Mode::Unenrolling(_)) => {
                key_hint_line(&[("Enter", "Unenroll"), ("Esc", "Cancel")])
            }
            (Screen::Login(_), Mode::Normal) => key_hint_line(&[
                ("↑↓", "Select role"),
                ("Enter", "Login"),
                ("Q", "Quit"),
            ]),
            (Screen::Admin(_), Mode::Normal) => key_hint_line(&[
                ("↑↓", "Select"),
                ("A", "Add"),
                ("D", "Delete"),
                ("S", "Search"),
                ("C", "Clear filter"),
                ("Esc", "Logout"),
            ]),
            (Screen::Student(_), Mode::Normal) => key_hint_line(&[
                ("↑↓", "Scroll"),
                ("E", "Enroll"),
                ("U", "Unenroll"),
                ("R", "Refresh"),
                ("Esc", "Logout"),
            ]),
        }
    }

    fn draw_course_form(&self, frame: &mut Frame, area: Rect, form: &CourseForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Course").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Code", CourseField::Code),
            form.build_line("Name", CourseField::Name),
            form.build_line("Faculty", CourseField::Faculty),
            form.build_line("Fees", CourseField::Fees),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "All fields are required.",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            CourseField::Code => ("Code: ", 0),
            CourseField::Name => ("Name: ", 1),
            CourseField::Faculty => ("Faculty: ", 2),
            CourseField::Fees => ("Fees: ", 3),
        };
        let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmCourseDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Are you sure you want to delete course {} ({})?",
                confirm.code, confirm.name
            )),
            Line::from("Existing enrollments for this course are kept."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_form(&self, frame: &mut Frame, area: Rect, form: &SearchForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Search Courses")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let field_style = if form.active == SearchPart::Field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let pattern_style = if form.active == SearchPart::Pattern {
            Style::default().fg(Color::Yellow)
        } else if form.pattern.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let pattern_display = if form.pattern.is_empty() {
            "<matches everything>".to_string()
        } else {
            form.pattern.clone()
        };

        let lines = vec![
            Line::from(vec![
                Span::raw("Field: "),
                Span::styled(form.field.label(), field_style),
            ]),
            Line::from(vec![
                Span::raw("Pattern: "),
                Span::styled(pattern_display, pattern_style),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Substring match on the chosen field.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if form.active == SearchPart::Pattern {
            let cursor_x = inner.x + "Pattern: ".len() as u16 + form.pattern_len() as u16;
            frame.set_cursor_position((cursor_x, inner.y + 1));
        }
    }

    fn draw_enroll_form(&self, frame: &mut Frame, area: Rect, form: &EnrollForm) {
        let popup_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Enroll").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let name_style = if form.active == EnrollPart::Name {
            Style::default().fg(Color::Yellow)
        } else if form.name.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let name_display = if form.name.is_empty() {
            "<required>".to_string()
        } else {
            form.name.clone()
        };
        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::raw("Student name: "),
                Span::styled(name_display, name_style),
            ]),
            Line::from("Select course:"),
        ]);
        frame.render_widget(header, chunks[0]);

        let courses: &[Course] = match &self.screen {
            Screen::Student(student) => &student.courses,
            _ => &[],
        };
        if courses.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "<no courses available>",
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(empty, chunks[1]);
        } else {
            let items: Vec<ListItem> = courses
                .iter()
                .map(|course| ListItem::new(course.to_string()))
                .collect();
            let highlight = if form.active == EnrollPart::Course {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let list = List::new(items)
                .highlight_style(highlight)
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(form.selected);
            frame.render_stateful_widget(list, chunks[1], &mut state);
        }

        let trailer = if let Some(error) = &form.error {
            Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ))
        } else {
            Line::from(Span::styled(
                "Tab switches between name and course.",
                Style::default().fg(Color::Gray),
            ))
        };
        frame.render_widget(Paragraph::new(trailer).wrap(Wrap { trim: true }), chunks[2]);

        if form.active == EnrollPart::Name {
            let cursor_x = chunks[0].x + "Student name: ".len() as u16 + form.name_len() as u16;
            frame.set_cursor_position((cursor_x, chunks[0].y));
        }
    }

    fn draw_unenroll_form(&self, frame: &mut Frame, area: Rect, form: &NameForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Unenroll").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let name_style = if form.name.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let name_display = if form.name.is_empty() {
            "<required>".to_string()
        } else {
            form.name.clone()
        };

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Student name: "),
                Span::styled(name_display, name_style),
            ]),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Removes your current enrollment, if any.",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = inner.x + "Student name: ".len() as u16 + form.name_len() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }
}
