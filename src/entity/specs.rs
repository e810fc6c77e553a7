use super::{EntitySpec, Field, Reference};

pub static TASK: EntitySpec = EntitySpec {
    table: "tasks",
    fields: &[
        Field::text("name", "task_name").with_aliases(&["taskName"]),
        Field::text("company", "company"),
        Field::text("project", "project"),
        Field::text("stakeholder", "stakeholder"),
        Field::text("dueDate", "due_date"),
        Field::text("priority", "priority"),
        Field::text("status", "status").with_default("Not Started"),
        Field::text("type", "type").with_default("Task"),
        Field::text("notes", "notes"),
        Field::text("createdAt", "created_at").read_only(),
    ],
    references: &[
        Reference {
            field: "company",
            table: "companies",
            id_column: "company_id",
        },
        Reference {
            field: "project",
            table: "projects",
            id_column: "project_id",
        },
        Reference {
            field: "stakeholder",
            table: "contacts",
            id_column: "stakeholder_id",
        },
    ],
    search_fields: &["name", "company", "project", "stakeholder"],
};

pub static PROJECT: EntitySpec = EntitySpec {
    table: "projects",
    fields: &[
        Field::text("name", "name"),
        Field::text("company", "company"),
        Field::text("status", "status"),
        Field::text("startDate", "start_date"),
        Field::text("revenueModel", "revenue_model"),
        Field::text("feeStructure", "fee_structure"),
        Field::number("pipelineValue", "pipeline_value"),
        Field::number("actualRevenue", "actual_revenue"),
        Field::text("stakeholders", "stakeholders"),
        Field::text("nextMilestone", "next_milestone"),
        Field::text("notes", "notes"),
    ],
    references: &[Reference {
        field: "company",
        table: "companies",
        id_column: "company_id",
    }],
    search_fields: &["name", "company", "stakeholders"],
};

pub static CONTACT: EntitySpec = EntitySpec {
    table: "contacts",
    fields: &[
        Field::text("name", "name"),
        Field::text("organization", "organization"),
        Field::text("role", "role"),
        Field::text("email", "email"),
        Field::text("phone", "phone"),
        Field::text("type", "type"),
        Field::text("projects", "projects"),
        Field::text("lastContact", "last_contact"),
        Field::text("nextAction", "next_action"),
        Field::text("relationshipStrength", "relationship_strength"),
        Field::text("notes", "notes"),
        Field::text("tags", "tags"),
    ],
    references: &[Reference {
        field: "organization",
        table: "companies",
        id_column: "organization_id",
    }],
    search_fields: &["name", "organization", "role", "email"],
};

pub static COMPANY: EntitySpec = EntitySpec {
    table: "companies",
    fields: &[
        Field::text("name", "name"),
        Field::text("type", "type"),
        Field::text("primaryContact", "primary_contact"),
        Field::text("status", "status"),
        Field::text("projects", "projects"),
        Field::number("totalPipeline", "total_pipeline"),
        Field::number("totalRevenue", "total_revenue"),
        Field::text("notes", "notes"),
    ],
    references: &[Reference {
        field: "primaryContact",
        table: "contacts",
        id_column: "primary_contact_id",
    }],
    search_fields: &["name", "type", "primaryContact"],
};

pub static RELATIONSHIP: EntitySpec = EntitySpec {
    table: "relationships",
    fields: &[
        Field::text("source", "source"),
        Field::text("target", "target"),
        Field::text("strength", "strength"),
    ],
    references: &[],
    search_fields: &[],
};

pub static CAPITAL_SCORE: EntitySpec = EntitySpec {
    table: "capital_scores",
    fields: &[
        Field::text("contactName", "contact_name"),
        Field::number("economic", "economic"),
        Field::number("social", "social"),
        Field::number("political", "political"),
        Field::number("career", "career"),
    ],
    references: &[],
    search_fields: &[],
};

pub static INVESTMENT: EntitySpec = EntitySpec {
    table: "investments",
    fields: &[
        Field::text("investor", "investor"),
        Field::text("startup", "startup"),
        Field::text("stage", "stage"),
        Field::number("amount", "amount"),
        Field::text("status", "status"),
    ],
    references: &[],
    search_fields: &[],
};
