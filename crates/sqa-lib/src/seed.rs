//! Demo dataset written to an empty store on first open.

use chrono::NaiveDate;

use crate::model::{
    Issue, Priority, Project, ProjectStatus, ProjectType, Severity, Status, TestType,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

struct SampleIssue {
    id: &'static str,
    project_id: &'static str,
    test_type: TestType,
    reported: NaiveDate,
    reporter: &'static str,
    page_screen: &'static str,
    test_case: &'static str,
    title: &'static str,
    description: &'static str,
    steps: &'static str,
    expected: &'static str,
    actual: &'static str,
    severity: Severity,
    priority: Priority,
    status: Status,
    browser: &'static str,
    assigned: &'static str,
    fixed: Option<NaiveDate>,
    comments: &'static str,
}

impl SampleIssue {
    fn build(self) -> Issue {
        let optional = |s: &str| if s.is_empty() { None } else { text(s) };
        Issue {
            id: self.id.to_string(),
            project_id: self.project_id.to_string(),
            test_type: self.test_type,
            date_reported: self.reported,
            reporter: self.reporter.to_string(),
            page_screen: self.page_screen.to_string(),
            test_case: self.test_case.to_string(),
            title: self.title.to_string(),
            description: optional(self.description),
            steps_to_reproduce: optional(self.steps),
            expected_behavior: optional(self.expected),
            actual_behavior: optional(self.actual),
            severity: self.severity,
            priority: self.priority,
            status: self.status,
            browser_device: optional(self.browser),
            screenshot_url: None,
            assigned_to: optional(self.assigned),
            date_fixed: self.fixed,
            comments: optional(self.comments),
        }
    }
}

fn sample_issues() -> Vec<Issue> {
    [
        SampleIssue {
            id: "FUNC-001",
            project_id: "ecommerce-1",
            test_type: TestType::Functional,
            reported: date(2023, 10, 26),
            reporter: "Alice Smith",
            page_screen: "Checkout",
            test_case: "Verify applying discount code",
            title: "Discount code field not accepting all characters",
            description: "The discount code input field does not allow special characters like # and @.",
            steps: "1. Go to checkout page. 2. Enter discount code with special characters (e.g., SAVE#20). 3. Observe error.",
            expected: "Discount code field should accept standard special characters.",
            actual: "Input field rejects special characters.",
            severity: Severity::High,
            priority: Priority::P1,
            status: Status::Open,
            browser: "Chrome on Desktop",
            assigned: "Bob Johnson",
            fixed: None,
            comments: "",
        },
        SampleIssue {
            id: "UI-001",
            project_id: "ecommerce-1",
            test_type: TestType::Ui,
            reported: date(2023, 10, 25),
            reporter: "Charlie Brown",
            page_screen: "Product Detail",
            test_case: "Check image gallery responsiveness",
            title: "Product image gallery not responsive on mobile",
            description: "On smaller screens, product images overflow the container.",
            steps: "1. Navigate to any product detail page on a mobile device. 2. Observe the image gallery.",
            expected: "Image gallery should adjust to screen size.",
            actual: "Images are cut off.",
            severity: Severity::Medium,
            priority: Priority::P2,
            status: Status::InProgress,
            browser: "Safari on iPhone",
            assigned: "David Lee",
            fixed: None,
            comments: "",
        },
        SampleIssue {
            id: "SEC-001",
            project_id: "banking-2",
            test_type: TestType::Security,
            reported: date(2023, 10, 26),
            reporter: "Alice Smith",
            page_screen: "Login",
            test_case: "Test brute force login attempts",
            title: "No lockout after multiple failed login attempts",
            description: "The app does not implement a lockout mechanism after several failed login attempts.",
            steps: "1. Enter invalid credentials multiple times. 2. Observe no temporary lockout.",
            expected: "Account should be temporarily locked after N failed attempts.",
            actual: "Login attempts are unlimited.",
            severity: Severity::Critical,
            priority: Priority::P0,
            status: Status::Open,
            browser: "Android App",
            assigned: "Eve Adams",
            fixed: None,
            comments: "",
        },
        SampleIssue {
            id: "API-001",
            project_id: "portal-3",
            test_type: TestType::Api,
            reported: date(2023, 10, 24),
            reporter: "Frank Green",
            page_screen: "User Profile API",
            test_case: "Validate GET /user/{id} response schema",
            title: "User profile API returns sensitive data without authorization",
            description: "The API endpoint /user/{id} returns full user details, including hashed passwords, to unauthorized users.",
            steps: "1. Send a GET request to /user/{id} without authentication. 2. Observe sensitive data in response.",
            expected: "API should require authentication and return limited data.",
            actual: "Sensitive data is exposed.",
            severity: Severity::Critical,
            priority: Priority::P0,
            status: Status::Fixed,
            browser: "Postman",
            assigned: "Grace Ho",
            fixed: Some(date(2023, 10, 25)),
            comments: "Fixed by adding authentication check and data filtering.",
        },
        SampleIssue {
            id: "PERF-001",
            project_id: "api-4",
            test_type: TestType::Performance,
            reported: date(2023, 10, 23),
            reporter: "Heidi King",
            page_screen: "Transaction Processing API",
            test_case: "Test API response time under load",
            title: "High latency on transaction processing API under load",
            description: "The API response time exceeds acceptable limits when handling 1000+ requests per second.",
            steps: "1. Use JMeter to simulate 1000+ concurrent users. 2. Monitor API response times.",
            expected: "API should maintain response times below 500ms under specified load.",
            actual: "Response times spike to 2+ seconds.",
            severity: Severity::High,
            priority: Priority::P1,
            status: Status::Closed,
            browser: "JMeter",
            assigned: "Ivy Wong",
            fixed: Some(date(2023, 10, 26)),
            comments: "Optimized database queries and scaled up instances.",
        },
    ]
    .into_iter()
    .map(SampleIssue::build)
    .collect()
}

/// The four demo projects with their sample issues attached.
#[must_use]
pub fn demo_projects() -> Vec<Project> {
    let issues = sample_issues();
    let project = |id: &str,
                   name: &str,
                   description: &str,
                   created: NaiveDate,
                   team_size: u32,
                   status: ProjectStatus,
                   project_type: ProjectType| Project {
        id: id.to_string(),
        name: name.to_string(),
        description: text(description),
        created_date: created,
        team_size,
        status,
        project_type,
        issues: issues.iter().filter(|i| i.project_id == id).cloned().collect(),
    };

    vec![
        project(
            "ecommerce-1",
            "E-commerce Platform",
            "Development and maintenance of the online retail platform.",
            date(2023, 1, 15),
            10,
            ProjectStatus::Active,
            ProjectType::WebApp,
        ),
        project(
            "banking-2",
            "Mobile Banking App",
            "Native mobile applications for iOS and Android banking.",
            date(2023, 3, 20),
            8,
            ProjectStatus::Active,
            ProjectType::MobileApp,
        ),
        project(
            "portal-3",
            "Customer Portal",
            "Web portal for customer self-service and account management.",
            date(2023, 6, 1),
            5,
            ProjectStatus::Active,
            ProjectType::WebApp,
        ),
        project(
            "api-4",
            "API Gateway",
            "Centralized API management and security layer.",
            date(2023, 8, 10),
            7,
            ProjectStatus::Archived,
            ProjectType::Api,
        ),
    ]
}
