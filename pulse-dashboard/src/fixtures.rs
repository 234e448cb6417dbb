//! Static dashboard content.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::High => "High Priority",
            Severity::Medium => "Medium Priority",
            Severity::Low => "Low Priority",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increasing,
    Stable,
    Decreasing,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Stable => "stable",
            Trend::Decreasing => "decreasing",
        }
    }
}

/// A recurring theme found in collected feedback.
#[derive(Debug, Clone, Copy)]
pub struct Insight {
    pub theme: &'static str,
    pub count: u32,
    pub percentage: u16,
    pub severity: Severity,
    pub trend: Trend,
    pub samples: [&'static str; 3],
}

pub const INSIGHTS: [Insight; 5] = [
    Insight {
        theme: "Claims Processing Delays",
        count: 23,
        percentage: 35,
        severity: Severity::High,
        trend: Trend::Increasing,
        samples: [
            "Claims take too long to process",
            "Employees frustrated with claim delays",
            "Need faster reimbursement process",
        ],
    },
    Insight {
        theme: "Low Employee Awareness",
        count: 18,
        percentage: 28,
        severity: Severity::Medium,
        trend: Trend::Stable,
        samples: [
            "Employees dont know about all benefits",
            "Need better communication about services",
            "Lack of benefit education",
        ],
    },
    Insight {
        theme: "Admin Interface Complexity",
        count: 12,
        percentage: 18,
        severity: Severity::Medium,
        trend: Trend::Decreasing,
        samples: [
            "Dashboard is confusing",
            "Too many steps to add employees",
            "Reports are hard to generate",
        ],
    },
    Insight {
        theme: "Provider Network Issues",
        count: 8,
        percentage: 12,
        severity: Severity::Low,
        trend: Trend::Stable,
        samples: [
            "Limited doctors in our area",
            "Need more specialist options",
            "Preferred providers not available",
        ],
    },
    Insight {
        theme: "Communication Gaps",
        count: 5,
        percentage: 7,
        severity: Severity::Low,
        trend: Trend::Decreasing,
        samples: [
            "Hard to reach support",
            "Updates not communicated well",
            "Need better notifications",
        ],
    },
];

#[derive(Debug, Clone, Copy)]
pub struct Satisfaction {
    pub category: &'static str,
    pub satisfied: u16,
}

impl Satisfaction {
    pub fn dissatisfied(&self) -> u16 {
        100 - self.satisfied
    }
}

pub const SATISFACTION: [Satisfaction; 4] = [
    Satisfaction {
        category: "Benefits Satisfaction",
        satisfied: 78,
    },
    Satisfaction {
        category: "Admin Workflow",
        satisfied: 65,
    },
    Satisfaction {
        category: "Support Experience",
        satisfied: 82,
    },
    Satisfaction {
        category: "Employee Usage",
        satisfied: 58,
    },
];

/// Headline numbers on the admin overview, besides the live response count.
pub const KPIS: [(&str, &str); 3] = [
    ("Avg. Satisfaction", "71%"),
    ("Key Issues", "5"),
    ("Response Rate", "84%"),
];

#[derive(Debug, Clone, Copy)]
pub struct Feedback {
    pub quote: &'static str,
    pub age: &'static str,
    pub severity: Severity,
}

pub const RECENT_FEEDBACK: [Feedback; 3] = [
    Feedback {
        quote: "The new claims process is much faster now. Great improvement!",
        age: "2 hours ago",
        severity: Severity::Low,
    },
    Feedback {
        quote: "Could use better communication about benefit updates.",
        age: "5 hours ago",
        severity: Severity::Medium,
    },
    Feedback {
        quote: "Admin interface is still confusing for new users.",
        age: "1 day ago",
        severity: Severity::High,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct Endorsement {
    pub title: &'static str,
    pub insurer: &'static str,
    pub policy_id: &'static str,
    pub month: &'static str,
    pub additions: u32,
    pub deletions: u32,
    pub corrections: u32,
    pub open_till: &'static str,
}

pub const ENDORSEMENTS: [Endorsement; 2] = [
    Endorsement {
        title: "Group Medical Coverage (GMC)",
        insurer: "Aviva",
        policy_id: "XYZ-0002",
        month: "June",
        additions: 508,
        deletions: 22,
        corrections: 12,
        open_till: "14/08/2025",
    },
    Endorsement {
        title: "Group Medical Coverage (GMC)",
        insurer: "Kotak Life",
        policy_id: "XYZ-0003",
        month: "June",
        additions: 290,
        deletions: 18,
        corrections: 10,
        open_till: "14/08/2025",
    },
];

#[derive(Debug, Clone, Copy)]
pub struct Policy {
    pub name: &'static str,
    pub insurer: &'static str,
    pub sum_insured: &'static str,
    pub valid_till: &'static str,
    pub policy_id: &'static str,
    pub employees: &'static str,
    pub dependents: &'static str,
    pub status: &'static str,
}

pub const POLICIES: [Policy; 3] = [
    Policy {
        name: "Group health insurance",
        insurer: "Care Health Insurance",
        sum_insured: "₹ 3L, ₹ 5L, ₹ 10L",
        valid_till: "10/12/2021",
        policy_id: "LPP-ABC123",
        employees: "12,000",
        dependents: "2,000",
        status: "Active",
    },
    Policy {
        name: "Accidental insurance",
        insurer: "Aditya Birla Sun Life Insurance",
        sum_insured: "₹ 3L, ₹ 5L, ₹ 10L",
        valid_till: "10/12/2021",
        policy_id: "LPP-ABC123",
        employees: "12,000",
        dependents: "2,000",
        status: "Active",
    },
    Policy {
        name: "Term life insurance",
        insurer: "Bharti AXA General Insurance",
        sum_insured: "₹ 3L, ₹ 5L, ₹ 10L",
        valid_till: "10/12/2021",
        policy_id: "LPP-ABC123",
        employees: "12,000",
        dependents: "2,000",
        status: "Active",
    },
];
