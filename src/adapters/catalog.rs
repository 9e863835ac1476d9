//! Operation catalog
//!
//! One row per supported endpoint, built once on first use.

use super::types::{Adapter, Argument, Binding, ParamKind, Shape};
use crate::decode::ItemSelector;
use crate::envelope::CapacitySource;
use crate::error::{Error, Result};
use crate::types::Query;
use serde::Serialize;
use std::sync::LazyLock;

const ISSUE_EXPAND: &str =
    "renderedFields,names,schema,transitions,editmeta,changelog,versionedRepresentations";

const DASHBOARD_EXPAND: &str =
    "description,owner,viewUrl,favourite,favouritedCount,sharePermissions,editPermissions,isWritable";

const FILTER_EXPAND: &str = "description,owner,jql,viewUrl,searchUrl,favourite,favouritedCount,\
sharePermissions,editPermissions,isWritable,approximateLastUsed,subscriptions";

const SCREEN_SCOPES: &[&str] = &["GLOBAL", "PROJECT", "TEMPLATE"];

const AUDIT_LIMIT: u32 = 1000;

const PROJECT_ID_OR_KEY: ParamKind = ParamKind::Text("project id or key");

fn adapter(name: &'static str, about: &'static str, path: &'static str, shape: Shape) -> Adapter {
    Adapter {
        name,
        about,
        path,
        argument: Argument::None,
        binding: Binding::PathSegment,
        shape,
        query: Query::new(),
    }
}

impl Adapter {
    fn required(mut self, kind: ParamKind) -> Self {
        self.argument = Argument::Required(kind);
        self
    }

    fn optional(mut self, kind: ParamKind) -> Self {
        self.argument = Argument::Optional(kind);
        self
    }

    fn bound(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }
}

/// All supported operations, in listing order
pub static CATALOG: LazyLock<Vec<Adapter>> = LazyLock::new(|| {
    vec![
        // Groups & users
        adapter(
            "find-groups",
            "Find groups whose names contain a query string",
            "groups/picker",
            Shape::Items {
                selector: ItemSelector::Field("groups"),
                summary_field: Some("header"),
                total_field: None,
                capacity: None,
            },
        )
        .required(ParamKind::Text("query string"))
        .bound(Binding::QueryParam("query"))
        .with_query(Query::new().with("caseInsensitive", true)),
        adapter(
            "get-users-from-group",
            "List the members of a group, including inactive users",
            "group/member",
            Shape::paged(),
        )
        .required(ParamKind::Text("group id or name"))
        .bound(Binding::GroupIdOrName)
        .with_query(Query::new().with("includeInactiveUsers", true)),
        adapter(
            "get-current-user",
            "Get the calling user with groups and application roles",
            "myself",
            Shape::Record,
        )
        .with_query(Query::new().with("expand", "groups,applicationRoles")),
        // Auditing & instance
        adapter(
            "get-audit-records",
            "Get the most recent audit records",
            "auditing/record",
            Shape::Items {
                selector: ItemSelector::Field("records"),
                summary_field: None,
                total_field: Some("total"),
                capacity: Some(CapacitySource::Fixed(u64::from(AUDIT_LIMIT))),
            },
        )
        .with_query(Query::new().with("offset", 0u32).with("limit", AUDIT_LIMIT)),
        adapter(
            "get-server-info",
            "Get information about the instance",
            "serverInfo",
            Shape::Record,
        ),
        adapter(
            "get-global-settings",
            "Get the global settings",
            "configuration",
            Shape::Record,
        ),
        adapter(
            "get-advanced-settings",
            "Get the advanced application properties",
            "application-properties/advanced-settings",
            Shape::array(),
        ),
        adapter(
            "get-all-permissions",
            "Get all permissions, including app-defined ones",
            "permissions",
            Shape::Record,
        ),
        // Issues
        adapter(
            "get-issue",
            "Get an issue with all fields, properties and expansions",
            "issue/{}",
            Shape::Items {
                selector: ItemSelector::WholePayload,
                summary_field: None,
                total_field: None,
                capacity: None,
            },
        )
        .required(ParamKind::IssueIdOrKey)
        .with_query(
            Query::new()
                .with("fields", "*all")
                .with("fieldsByKeys", true)
                .with("expand", ISSUE_EXPAND)
                .with("properties", "*all")
                .with("caseInsensitive", true),
        ),
        adapter(
            "get-issue-worklogs",
            "Get the worklogs of an issue",
            "issue/{}/worklog",
            Shape::Items {
                selector: ItemSelector::Field("worklogs"),
                summary_field: None,
                total_field: None,
                capacity: Some(CapacitySource::Field("maxResults")),
            },
        )
        .required(ParamKind::IssueIdOrKey)
        .with_query(Query::new().with("startAt", 0u32)),
        adapter(
            "get-all-issue-types-for-user",
            "Get the issue types visible to the user",
            "issuetype",
            Shape::array(),
        ),
        adapter(
            "get-alternative-issue-types",
            "Get the issue types an issue type can be switched to",
            "issuetype/{}/alternatives",
            Shape::array(),
        )
        .required(ParamKind::Numeric("issue type id")),
        adapter("get-fields", "Get all system and custom fields", "field", Shape::array()),
        adapter(
            "get-fields-paginated",
            "Walk all fields page by page",
            "field/search",
            Shape::paged(),
        ),
        adapter("get-all-labels", "Walk all labels", "label", Shape::paged()),
        adapter(
            "search-priorities",
            "Walk all issue priorities",
            "priority/search",
            Shape::paged(),
        ),
        // Projects
        adapter("get-project", "Get a project", "project/{}", Shape::Record)
            .required(PROJECT_ID_OR_KEY),
        adapter(
            "get-project-notification-scheme",
            "Get the notification scheme of a project",
            "project/{}/notificationscheme",
            Shape::Record,
        )
        .required(PROJECT_ID_OR_KEY),
        adapter(
            "get-project-issue-type-hierarchy",
            "Get the issue type hierarchy of a project",
            "project/{}/hierarchy",
            Shape::Record,
        )
        .required(ParamKind::Numeric("project id")),
        adapter(
            "get-all-statuses-for-project",
            "Get the valid statuses per issue type of a project",
            "project/{}/statuses",
            Shape::array(),
        )
        .required(PROJECT_ID_OR_KEY),
        adapter(
            "get-projects-paginated",
            "Walk all visible projects",
            "project/search",
            Shape::paged(),
        ),
        adapter(
            "get-workflows-paginated",
            "Walk all workflows",
            "workflow/search",
            Shape::paged(),
        ),
        // Filters & dashboards
        adapter(
            "get-columns",
            "Get the columns configured for a filter",
            "filter/{}/columns",
            Shape::array(),
        )
        .required(ParamKind::Numeric("filter id")),
        adapter(
            "search-for-filters",
            "Walk all visible filters",
            "filter/search",
            Shape::paged(),
        )
        .with_query(Query::new().with("expand", FILTER_EXPAND)),
        adapter(
            "search-for-dashboards",
            "Walk all visible dashboards",
            "dashboard/search",
            Shape::paged(),
        )
        .with_query(Query::new().with("expand", DASHBOARD_EXPAND)),
        // Screens
        adapter(
            "get-screens",
            "Walk all screens, optionally by scope or query string",
            "screens",
            Shape::paged(),
        )
        .optional(ParamKind::Text("scope=A&scope=B or query string"))
        .bound(Binding::ListOrQueryString("scope"))
        .with_query(Query::new().with("orderBy", "+id").with("scope", SCREEN_SCOPES)),
        adapter(
            "get-available-screen-fields",
            "Get the fields that can be added to a screen",
            "screens/{}/availableFields",
            Shape::array(),
        )
        .required(ParamKind::Numeric("screen id")),
        adapter(
            "get-screen-schemes",
            "Walk all screen schemes, optionally by id or query string",
            "screenscheme",
            Shape::paged(),
        )
        .optional(ParamKind::Text("id=1&id=2 or query string"))
        .bound(Binding::ListOrQueryString("id"))
        .with_query(
            Query::new()
                .with("orderBy", "+id")
                .with("expand", "issueTypeScreenSchemes"),
        ),
    ]
});

/// Look up an operation by name
pub fn find(name: &str) -> Result<&'static Adapter> {
    CATALOG
        .iter()
        .find(|adapter| adapter.name == name)
        .ok_or_else(|| Error::UnknownOperation {
            name: name.to_string(),
        })
}

/// Listing entry for one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub operation: &'static str,
    pub about: &'static str,
    pub path: &'static str,
    pub shape: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
}

/// Describe every operation, in catalog order
pub fn list() -> Vec<CatalogEntry> {
    CATALOG
        .iter()
        .map(|adapter| CatalogEntry {
            operation: adapter.name,
            about: adapter.about,
            path: adapter.path,
            shape: adapter.shape.kind(),
            argument: adapter.argument.usage(),
        })
        .collect()
}
