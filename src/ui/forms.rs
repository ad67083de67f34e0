use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::db::SearchField;
use crate::models::Course;

/// Internal representation of the "add course" form fields.
#[derive(Default, Clone)]
pub(crate) struct CourseForm {
    pub(crate) code: String,
    pub(crate) name: String,
    pub(crate) faculty: String,
    pub(crate) fees: String,
    pub(crate) active: CourseField,
    pub(crate) error: Option<String>,
}

/// Fields available within the course form, in focus order.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum CourseField {
    Code,
    Name,
    Faculty,
    Fees,
}

impl Default for CourseField {
    fn default() -> Self {
        CourseField::Code
    }
}

impl CourseForm {
    /// Cycle focus across the four fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            CourseField::Code => CourseField::Name,
            CourseField::Name => CourseField::Faculty,
            CourseField::Faculty => CourseField::Fees,
            CourseField::Fees => CourseField::Code,
        };
    }

    fn value_mut(&mut self) -> &mut String {
        match self.active {
            CourseField::Code => &mut self.code,
            CourseField::Name => &mut self.name,
            CourseField::Faculty => &mut self.faculty,
            CourseField::Fees => &mut self.fees,
        }
    }

    /// Append a character to the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value_mut().push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.value_mut().pop();
    }

    /// Validate the inputs and return trimmed values ready for persistence.
    /// Every field is required.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, String, String)> {
        let code = self.code.trim();
        if code.is_empty() {
            return Err(anyhow!("Course code is required."));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Course name is required."));
        }
        let faculty = self.faculty.trim();
        if faculty.is_empty() {
            return Err(anyhow!("Faculty is required."));
        }
        let fees = self.fees.trim();
        if fees.is_empty() {
            return Err(anyhow!("Fees are required."));
        }
        Ok((
            code.to_string(),
            name.to_string(),
            faculty.to_string(),
            fees.to_string(),
        ))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: CourseField) -> Line<'static> {
        let (value, is_active) = match field {
            CourseField::Code => (&self.code, self.active == CourseField::Code),
            CourseField::Name => (&self.name, self.active == CourseField::Name),
            CourseField::Faculty => (&self.faculty, self.active == CourseField::Faculty),
            CourseField::Fees => (&self.fees, self.active == CourseField::Fees),
        };

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: CourseField) -> usize {
        match field {
            CourseField::Code => self.code.chars().count(),
            CourseField::Name => self.name.chars().count(),
            CourseField::Faculty => self.faculty.chars().count(),
            CourseField::Fees => self.fees.chars().count(),
        }
    }
}

/// Which half of the search form has focus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum SearchPart {
    Field,
    Pattern,
}

/// Form state for the admin search: a field selector cycled with the arrow
/// keys plus a free-text pattern. An empty pattern is allowed and matches
/// every row.
pub(crate) struct SearchForm {
    pub(crate) field: SearchField,
    pub(crate) pattern: String,
    pub(crate) active: SearchPart,
}

impl Default for SearchForm {
    fn default() -> Self {
        // The historical default searched by course name; going through the
        // label map keeps the selector and the store speaking the same
        // vocabulary.
        Self {
            field: SearchField::from_label("Course Name"),
            pattern: String::new(),
            active: SearchPart::Field,
        }
    }
}

impl SearchForm {
    /// Swap focus between the selector and the pattern entry.
    pub(crate) fn toggle_part(&mut self) {
        self.active = match self.active {
            SearchPart::Field => SearchPart::Pattern,
            SearchPart::Pattern => SearchPart::Field,
        };
    }

    /// Step the field selector. Only meaningful while the selector has
    /// focus; the caller gates on that.
    pub(crate) fn cycle_field(&mut self, delta: isize) {
        let len = SearchField::ALL.len() as isize;
        let index = SearchField::ALL
            .iter()
            .position(|field| *field == self.field)
            .unwrap_or(0) as isize;
        self.field = SearchField::ALL[(index + delta).rem_euclid(len) as usize];
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.pattern.push(ch);
        if self.active == SearchPart::Field {
            self.active = SearchPart::Pattern;
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.pattern.pop();
    }

    pub(crate) fn pattern_len(&self) -> usize {
        self.pattern.chars().count()
    }
}

/// Which half of the enroll form has focus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum EnrollPart {
    Name,
    Course,
}

/// Form state for student enrollment: the student's name plus a selection
/// into the course list the student screen is currently showing.
pub(crate) struct EnrollForm {
    pub(crate) name: String,
    pub(crate) selected: Option<usize>,
    pub(crate) active: EnrollPart,
    pub(crate) error: Option<String>,
}

impl EnrollForm {
    /// Start with the first course pre-selected when any exist, mirroring a
    /// dropdown that opens on its first entry.
    pub(crate) fn new(course_count: usize) -> Self {
        Self {
            name: String::new(),
            selected: if course_count == 0 { None } else { Some(0) },
            active: EnrollPart::Name,
            error: None,
        }
    }

    pub(crate) fn toggle_part(&mut self) {
        self.active = match self.active {
            EnrollPart::Name => EnrollPart::Course,
            EnrollPart::Course => EnrollPart::Name,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if self.active != EnrollPart::Name || ch.is_control() {
            return false;
        }
        self.name.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        if self.active == EnrollPart::Name {
            self.name.pop();
        }
    }

    /// Move the course selection, clamped to the available range.
    pub(crate) fn move_selection(&mut self, delta: isize, course_count: usize) {
        if course_count == 0 {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0) as isize;
        let clamped = (current + delta).clamp(0, course_count as isize - 1);
        self.selected = Some(clamped as usize);
    }

    /// Validate the form against the courses on offer, returning the trimmed
    /// student name and the *code* of the chosen course. The selector shows
    /// names, but enrollments reference courses by code.
    pub(crate) fn parse_inputs(&self, courses: &[Course]) -> Result<(String, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Student name is required."));
        }
        let course = self
            .selected
            .and_then(|idx| courses.get(idx))
            .ok_or_else(|| anyhow!("Pick a course to enroll in."))?;
        Ok((name.to_string(), course.code.clone()))
    }

    pub(crate) fn name_len(&self) -> usize {
        self.name.chars().count()
    }
}

/// Minimal single-field form used for unenrollment, which only needs the
/// student's name.
#[derive(Default)]
pub(crate) struct NameForm {
    pub(crate) name: String,
    pub(crate) error: Option<String>,
}

impl NameForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.name.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.name.pop();
    }

    pub(crate) fn parse_input(&self) -> Result<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Student name is required."));
        }
        Ok(name.to_string())
    }

    pub(crate) fn name_len(&self) -> usize {
        self.name.chars().count()
    }
}

/// State for the course-deletion confirmation dialog.
#[derive(Clone)]
pub(crate) struct ConfirmCourseDelete {
    pub(crate) code: String,
    pub(crate) name: String,
}

impl ConfirmCourseDelete {
    pub(crate) fn from(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courses() -> Vec<Course> {
        vec![
            Course {
                code: "CS101".into(),
                name: "Intro to CS".into(),
                faculty: "Engineering".into(),
                fees: "500".into(),
            },
            Course {
                code: "MA201".into(),
                name: "Advanced Math".into(),
                faculty: "Science".into(),
                fees: "450".into(),
            },
        ]
    }

    #[test]
    fn course_form_requires_every_field() {
        let mut form = CourseForm::default();
        assert!(form.parse_inputs().is_err());

        form.code = "CS101".into();
        form.name = "Intro to CS".into();
        form.faculty = "Engineering".into();
        assert_eq!(
            form.parse_inputs().unwrap_err().to_string(),
            "Fees are required."
        );

        form.fees = "  500  ".into();
        let (code, name, faculty, fees) = form.parse_inputs().expect("form should validate");
        assert_eq!(
            (code.as_str(), name.as_str(), faculty.as_str(), fees.as_str()),
            ("CS101", "Intro to CS", "Engineering", "500")
        );
    }

    #[test]
    fn course_form_rejects_whitespace_only_values() {
        let mut form = CourseForm::default();
        form.code = "   ".into();
        form.name = "x".into();
        form.faculty = "y".into();
        form.fees = "z".into();
        assert_eq!(
            form.parse_inputs().unwrap_err().to_string(),
            "Course code is required."
        );
    }

    #[test]
    fn search_form_defaults_to_name_and_cycles() {
        let mut form = SearchForm::default();
        assert_eq!(form.field, SearchField::Name);
        form.cycle_field(1);
        assert_eq!(form.field, SearchField::Faculty);
        form.cycle_field(-2);
        assert_eq!(form.field, SearchField::Code);
        form.cycle_field(-1);
        assert_eq!(form.field, SearchField::Fees);
    }

    #[test]
    fn typing_into_search_moves_focus_to_the_pattern() {
        let mut form = SearchForm::default();
        assert_eq!(form.active, SearchPart::Field);
        form.push_char('M');
        assert_eq!(form.active, SearchPart::Pattern);
        assert_eq!(form.pattern, "M");
    }

    #[test]
    fn enroll_form_maps_the_selected_name_to_a_code() {
        let courses = courses();
        let mut form = EnrollForm::new(courses.len());
        form.name = "Alice".into();
        form.move_selection(1, courses.len());

        let (name, code) = form.parse_inputs(&courses).expect("form should validate");
        assert_eq!(name, "Alice");
        assert_eq!(code, "MA201");
    }

    #[test]
    fn enroll_form_rejects_missing_name_or_course() {
        let courses = courses();
        let form = EnrollForm::new(courses.len());
        assert_eq!(
            form.parse_inputs(&courses).unwrap_err().to_string(),
            "Student name is required."
        );

        let mut form = EnrollForm::new(0);
        form.name = "Alice".into();
        assert_eq!(
            form.parse_inputs(&[]).unwrap_err().to_string(),
            "Pick a course to enroll in."
        );
    }

    #[test]
    fn enroll_selection_clamps_to_the_course_list() {
        let mut form = EnrollForm::new(2);
        form.move_selection(10, 2);
        assert_eq!(form.selected, Some(1));
        form.move_selection(-10, 2);
        assert_eq!(form.selected, Some(0));
        form.move_selection(1, 0);
        assert_eq!(form.selected, None);
    }

    #[test]
    fn name_form_trims_and_requires_input() {
        let mut form = NameForm::default();
        form.name = "  ".into();
        assert!(form.parse_input().is_err());
        form.name = " Alice ".into();
        assert_eq!(form.parse_input().expect("should validate"), "Alice");
    }
}
