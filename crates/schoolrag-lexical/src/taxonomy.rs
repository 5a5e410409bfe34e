//! Keyword categories used to precompute per-document affinity.
//!
//! A category is activated by a query that contains the category *label*;
//! its *terms* only feed the per-document affinity counts.

use schoolrag_core::config::TaxonomyPreset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub terms: Vec<String>,
}

/// Ordered, immutable set of keyword categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

#[rustfmt::skip]
const FULL: &[(&str, &[&str])] = &[
    ("student", &["student", "admission", "enrollment", "register", "enroll", "applicant", "pupil", "learner", "admissions", "registration", "student_id", "roll_number", "student_list", "student_profile", "student_details", "student_information", "student_record"]),
    ("teacher", &["teacher", "staff", "employee", "faculty", "instructor", "educator", "professor", "tutor", "teaching_staff", "academic_staff", "teacher_profile", "staff_management", "employee_management", "teacher_details"]),
    ("fee", &["fee", "payment", "invoice", "billing", "finance", "fees", "tuition", "school_fee", "fee_collection", "fee_payment", "fee_structure", "fee_management", "payment_gateway", "online_payment", "fee_receipt", "fee_report", "due_fees", "fee_reminder", "paypal", "stripe", "razorpay", "paystack"]),
    ("attendance", &["attendance", "present", "absent", "tracking", "attendance_report", "daily_attendance", "attendance_management", "attendance_record", "attendance_sheet", "student_attendance", "teacher_attendance", "attendance_summary"]),
    ("exam", &["exam", "test", "result", "grade", "mark", "examination", "quiz", "assessment", "exam_result", "grade_report", "marksheet", "exam_schedule", "online_exam", "exam_management", "grading", "marks", "score", "evaluation"]),
    ("class", &["class", "section", "subject", "timetable", "classroom", "academic", "curriculum", "syllabus", "course", "class_schedule", "time_table", "class_management", "section_management", "subject_management", "academic_year", "semester"]),
    ("report", &["report", "analytics", "dashboard", "summary", "statistics", "data", "chart", "graph", "analysis", "performance", "academic_report", "financial_report", "attendance_report", "student_report", "teacher_report"]),
    ("login", &["login", "authentication", "access", "password", "signin", "logout", "user", "account", "profile", "security", "permission", "role", "admin", "user_management", "access_control"]),
    ("communication", &["message", "notification", "sms", "email", "communication", "alert", "reminder", "notice", "announcement", "messaging", "parent_communication", "bulk_sms", "email_template"]),
    ("library", &["library", "book", "issue", "return", "library_management", "book_issue", "book_return", "library_card", "book_catalog", "library_report"]),
    ("transport", &["transport", "bus", "route", "vehicle", "driver", "transport_management", "bus_route", "vehicle_management", "transport_fee"]),
    ("hostel", &["hostel", "dormitory", "room", "hostel_management", "room_allocation", "hostel_fee", "hostel_student"]),
    ("accounting", &["accounting", "expense", "income", "voucher", "transaction", "balance", "financial", "budget", "account", "ledger", "office_accounting", "expense_management", "income_management"]),
    ("homework", &["homework", "assignment", "task", "project", "homework_management", "assignment_submission", "homework_report"]),
    ("event", &["event", "calendar", "schedule", "activity", "program", "event_management", "school_event", "academic_calendar"]),
    ("certificate", &["certificate", "document", "transcript", "diploma", "certificate_generation", "student_certificate", "academic_certificate"]),
    ("live_class", &["live_class", "online_class", "virtual_class", "zoom", "meeting", "online_learning", "e_learning"]),
    ("payroll", &["payroll", "salary", "wage", "payroll_management", "salary_slip", "employee_salary", "staff_salary"]),
    ("leave", &["leave", "holiday", "vacation", "leave_application", "leave_management", "leave_request", "leave_approval"]),
    ("settings", &["settings", "configuration", "setup", "system_settings", "school_settings", "general_settings", "application_settings"]),
    ("branch", &["branch", "campus", "location", "multi_branch", "branch_management", "school_branch"]),
    ("backup", &["backup", "restore", "database", "system_backup", "data_backup", "backup_management"]),
    ("award", &["award", "achievement", "recognition", "honor", "prize", "award_management", "student_award"]),
    ("custom_field", &["custom_field", "field", "form", "custom_form", "additional_field", "extra_field"]),
    ("module", &["module", "addon", "plugin", "extension", "feature", "functionality"]),
    ("api", &["api", "integration", "webhook", "rest_api", "web_service", "third_party"]),
    ("mobile", &["mobile", "app", "android", "ios", "mobile_app", "smartphone"]),
    ("parent", &["parent", "guardian", "parent_portal", "parent_access", "parent_login", "parent_dashboard"]),
];

#[rustfmt::skip]
const COMPACT: &[(&str, &[&str])] = &[
    ("student", &["student", "admission", "enrollment", "register", "enroll", "applicant"]),
    ("teacher", &["teacher", "staff", "employee", "faculty", "instructor"]),
    ("fee", &["fee", "payment", "invoice", "billing", "finance", "fees"]),
    ("attendance", &["attendance", "present", "absent", "tracking"]),
    ("exam", &["exam", "test", "result", "grade", "mark", "examination"]),
    ("class", &["class", "section", "subject", "timetable", "classroom"]),
    ("report", &["report", "analytics", "dashboard", "summary"]),
    ("login", &["login", "authentication", "access", "password"]),
];

impl Taxonomy {
    /// Build from `(label, terms)` pairs. Labels and terms are lower-cased,
    /// duplicate terms within a category are dropped (first wins), and a
    /// repeated label keeps only its first definition.
    pub fn from_pairs<L, T, I>(pairs: I) -> Self
    where
        L: AsRef<str>,
        T: AsRef<str>,
        I: IntoIterator<Item = (L, Vec<T>)>,
    {
        let mut categories: Vec<Category> = Vec::new();
        for (label, terms) in pairs {
            let label = label.as_ref().to_lowercase();
            if categories.iter().any(|c| c.label == label) {
                continue;
            }
            let mut unique: Vec<String> = Vec::with_capacity(terms.len());
            for term in terms {
                let term = term.as_ref().to_lowercase();
                if !term.is_empty() && !unique.contains(&term) {
                    unique.push(term);
                }
            }
            categories.push(Category { label, terms: unique });
        }
        Self { categories }
    }

    /// The most complete keyword map.
    pub fn full() -> Self {
        Self::from_static(FULL)
    }

    /// The eight-category map.
    pub fn compact() -> Self {
        Self::from_static(COMPACT)
    }

    pub fn from_preset(preset: TaxonomyPreset) -> Self {
        match preset {
            TaxonomyPreset::Full => Self::full(),
            TaxonomyPreset::Compact => Self::compact(),
        }
    }

    fn from_static(table: &[(&str, &[&str])]) -> Self {
        Self::from_pairs(table.iter().map(|(label, terms)| (*label, terms.to_vec())))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn terms_of(&self, label: &str) -> Option<&[String]> {
        self.categories.iter().find(|c| c.label == label).map(|c| c.terms.as_slice())
    }

    /// Whether `term` belongs to `label`'s term set.
    pub fn contains(&self, label: &str, term: &str) -> bool {
        self.terms_of(label).is_some_and(|terms| terms.iter().any(|t| t == term))
    }

    /// Labels of every category whose term set holds `term`.
    pub fn categories_of<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.categories
            .iter()
            .filter(move |c| c.terms.iter().any(|t| t == term))
            .map(|c| c.label.as_str())
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::full()
    }
}
