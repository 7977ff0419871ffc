//! The fixed endpoint catalog.
//!
//! # Design
//! Each read endpoint is an `EndpointTemplate` constant: a path pattern with
//! an optional `{id}` placeholder plus the fixed query parameters sent with
//! it. Field selectors are tables of `FieldSpec`, so changing what a call
//! asks for means editing one table here and nothing else.
//!
//! Query parameters are always rendered in the same order: `fields`,
//! `filter`, `admin_only`, `access_token`, `limit`.

use crate::error::GraphError;

/// Page size used when the caller does not pass one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Path of the OAuth token exchange, below the OAuth version prefix.
pub const OAUTH_TOKEN_PATH: &str = "/oauth/access_token";

const ID_PLACEHOLDER: &str = "{id}";

/// One entry of a `fields=` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    Name(&'static str),
    /// Splice in another field table.
    List(&'static [FieldSpec]),
    /// The ten aliased per-type reaction counts.
    ReactionSummaries,
}

/// Reaction types counted for posts and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionType {
    None,
    Like,
    Love,
    Wow,
    Haha,
    Sad,
    Angry,
    Thankful,
    Pride,
    Care,
}

impl ReactionType {
    pub const ALL: [ReactionType; 10] = [
        ReactionType::None,
        ReactionType::Like,
        ReactionType::Love,
        ReactionType::Wow,
        ReactionType::Haha,
        ReactionType::Sad,
        ReactionType::Angry,
        ReactionType::Thankful,
        ReactionType::Pride,
        ReactionType::Care,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReactionType::None => "NONE",
            ReactionType::Like => "LIKE",
            ReactionType::Love => "LOVE",
            ReactionType::Wow => "WOW",
            ReactionType::Haha => "HAHA",
            ReactionType::Sad => "SAD",
            ReactionType::Angry => "ANGRY",
            ReactionType::Thankful => "THANKFUL",
            ReactionType::Pride => "PRIDE",
            ReactionType::Care => "CARE",
        }
    }

    /// Count-only summary aliased to `reactions_<type>`, so each type comes
    /// back as its own sibling key shaped `{"summary":{"total_count":n}}`.
    pub fn summary_field(self) -> String {
        let name = self.as_str();
        format!(
            "reactions.type({name}).limit(0).summary(total_count).as(reactions_{})",
            name.to_ascii_lowercase()
        )
    }
}

const GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::Name("id"),
    FieldSpec::Name("archived"),
    FieldSpec::Name("description"),
    FieldSpec::Name("cover.fields(id,source)"),
    FieldSpec::Name("icon"),
    FieldSpec::Name("created_time"),
    FieldSpec::Name("email"),
    FieldSpec::Name("member_count"),
    FieldSpec::Name("member_request_count"),
    FieldSpec::Name("name"),
    FieldSpec::Name("picture.fields(height,width,is_silhouette,url)"),
    FieldSpec::Name("privacy"),
    FieldSpec::Name("parent"),
];

const USER_GROUPS_FIELDS: &[FieldSpec] = &[
    FieldSpec::List(GROUP_FIELDS),
    FieldSpec::Name("administrator"),
];

const APP_INSTALLED_GROUP_FIELDS: &[FieldSpec] = &[FieldSpec::Name("id"), FieldSpec::Name("name")];

const POST_FIELDS: &[FieldSpec] = &[
    FieldSpec::Name("id"),
    FieldSpec::Name("created_time"),
    FieldSpec::Name("updated_time"),
    FieldSpec::Name("permalink_url"),
    FieldSpec::Name("full_picture"),
    FieldSpec::Name("type"),
    FieldSpec::Name("name"),
    FieldSpec::Name("message"),
    FieldSpec::Name("link"),
    FieldSpec::Name("shares"),
    FieldSpec::Name("story"),
    FieldSpec::ReactionSummaries,
    FieldSpec::Name("comments.limit(1).fields(id).summary(true).filter(stream)"),
];

const COMMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::Name("id"),
    FieldSpec::Name("created_time"),
    FieldSpec::Name("message"),
    FieldSpec::Name("permalink_url"),
    FieldSpec::Name("attachment.fields(description,media,target,title,type,url)"),
    FieldSpec::Name("parent.fields(id,created_time)"),
    FieldSpec::ReactionSummaries,
];

/// Comma-join a field table into a `fields=` value.
pub fn render_fields(fields: &[FieldSpec]) -> String {
    let mut out = Vec::new();
    collect_fields(fields, &mut out);
    out.join(",")
}

fn collect_fields(fields: &[FieldSpec], out: &mut Vec<String>) {
    for field in fields {
        match field {
            FieldSpec::Name(name) => out.push((*name).to_string()),
            FieldSpec::List(nested) => collect_fields(nested, out),
            FieldSpec::ReactionSummaries => {
                out.extend(ReactionType::ALL.iter().map(|r| r.summary_field()))
            }
        }
    }
}

/// Read endpoints below the graph version prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    UserGroup,
    UserGroups,
    AppInstalledGroups,
    GroupFeed,
    NodeComments,
}

#[derive(Debug, PartialEq, Eq)]
pub struct EndpointTemplate {
    /// Path below the version prefix; `{id}` is replaced by the node id.
    pub path: &'static str,
    pub fields: &'static [FieldSpec],
    pub filter: Option<&'static str>,
    /// Sends `admin_only=true`.
    pub admin_only: bool,
    /// Sends `limit`, defaulting to `DEFAULT_LIMIT`.
    pub paginated: bool,
}

const USER_GROUP: EndpointTemplate = EndpointTemplate {
    path: "/{id}",
    fields: GROUP_FIELDS,
    filter: None,
    admin_only: false,
    paginated: false,
};

const USER_GROUPS: EndpointTemplate = EndpointTemplate {
    path: "/me/groups",
    fields: USER_GROUPS_FIELDS,
    filter: None,
    admin_only: true,
    paginated: false,
};

const APP_INSTALLED_GROUPS: EndpointTemplate = EndpointTemplate {
    path: "/{id}/app_installed_groups",
    fields: APP_INSTALLED_GROUP_FIELDS,
    filter: Some("stream"),
    admin_only: false,
    paginated: false,
};

const GROUP_FEED: EndpointTemplate = EndpointTemplate {
    path: "/{id}/feed",
    fields: POST_FIELDS,
    filter: None,
    admin_only: false,
    paginated: true,
};

const NODE_COMMENTS: EndpointTemplate = EndpointTemplate {
    path: "/{id}/comments",
    fields: COMMENT_FIELDS,
    filter: Some("stream"),
    admin_only: false,
    paginated: true,
};

impl Endpoint {
    pub fn template(self) -> &'static EndpointTemplate {
        match self {
            Endpoint::UserGroup => &USER_GROUP,
            Endpoint::UserGroups => &USER_GROUPS,
            Endpoint::AppInstalledGroups => &APP_INSTALLED_GROUPS,
            Endpoint::GroupFeed => &GROUP_FEED,
            Endpoint::NodeComments => &NODE_COMMENTS,
        }
    }
}

impl EndpointTemplate {
    /// Render `<version><path>?<query>` for one call.
    pub fn render(
        &self,
        version: &str,
        id: Option<&str>,
        access_token: &str,
        limit: Option<u32>,
    ) -> Result<String, GraphError> {
        let path = self.render_path(id)?;

        let fields = render_fields(self.fields);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).to_string();
        let mut query: Vec<(&str, &str)> = vec![("fields", fields.as_str())];
        if let Some(filter) = self.filter {
            query.push(("filter", filter));
        }
        if self.admin_only {
            query.push(("admin_only", "true"));
        }
        query.push(("access_token", access_token));
        if self.paginated {
            query.push(("limit", limit.as_str()));
        }

        Ok(format!(
            "{version}{path}?{}",
            serde_urlencoded::to_string(&query)?
        ))
    }

    fn render_path(&self, id: Option<&str>) -> Result<String, GraphError> {
        if !self.path.contains(ID_PLACEHOLDER) {
            return Ok(self.path.to_string());
        }
        let id = id.unwrap_or_default();
        validate_node_id(id)?;
        Ok(self.path.replace(ID_PLACEHOLDER, id))
    }
}

/// Node ids are opaque, but must stay inside one path segment.
pub fn validate_node_id(id: &str) -> Result<(), GraphError> {
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(GraphError::InvalidNodeId(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REACTIONS: &str = "reactions.type(NONE).limit(0).summary(total_count).as(reactions_none),\
reactions.type(LIKE).limit(0).summary(total_count).as(reactions_like),\
reactions.type(LOVE).limit(0).summary(total_count).as(reactions_love),\
reactions.type(WOW).limit(0).summary(total_count).as(reactions_wow),\
reactions.type(HAHA).limit(0).summary(total_count).as(reactions_haha),\
reactions.type(SAD).limit(0).summary(total_count).as(reactions_sad),\
reactions.type(ANGRY).limit(0).summary(total_count).as(reactions_angry),\
reactions.type(THANKFUL).limit(0).summary(total_count).as(reactions_thankful),\
reactions.type(PRIDE).limit(0).summary(total_count).as(reactions_pride),\
reactions.type(CARE).limit(0).summary(total_count).as(reactions_care)";

    #[test]
    fn reaction_summary_rendering() {
        assert_eq!(
            ReactionType::Thankful.summary_field(),
            "reactions.type(THANKFUL).limit(0).summary(total_count).as(reactions_thankful)"
        );
        assert_eq!(render_fields(&[FieldSpec::ReactionSummaries]), REACTIONS);
    }

    #[test]
    fn user_groups_fields_extend_group_fields() {
        let single = render_fields(Endpoint::UserGroup.template().fields);
        let listing = render_fields(Endpoint::UserGroups.template().fields);
        assert!(!single.contains("administrator"));
        assert_eq!(listing, format!("{single},administrator"));
    }

    #[test]
    fn post_fields_place_reactions_before_comment_preview() {
        let fields = render_fields(Endpoint::GroupFeed.template().fields);
        assert_eq!(
            fields,
            format!(
                "id,created_time,updated_time,permalink_url,full_picture,type,name,message,link,shares,story,{REACTIONS},comments.limit(1).fields(id).summary(true).filter(stream)"
            )
        );
    }

    #[test]
    fn comment_fields_end_with_reactions() {
        let fields = render_fields(Endpoint::NodeComments.template().fields);
        assert!(fields.starts_with(
            "id,created_time,message,permalink_url,attachment.fields(description,media,target,title,type,url),parent.fields(id,created_time),"
        ));
        assert!(fields.ends_with(REACTIONS));
    }

    #[test]
    fn render_orders_query_parameters() {
        let path = Endpoint::NodeComments
            .template()
            .render("/v10.0", Some("7"), "tok", Some(5))
            .unwrap();
        let (route, query) = path.split_once('?').unwrap();
        assert_eq!(route, "/v10.0/7/comments");
        let keys: Vec<&str> = query
            .split('&')
            .map(|pair| pair.split_once('=').unwrap().0)
            .collect();
        assert_eq!(keys, ["fields", "filter", "access_token", "limit"]);
        assert!(query.contains("&filter=stream&access_token=tok&limit=5"));
    }

    #[test]
    fn paginated_endpoints_default_the_limit() {
        let path = Endpoint::GroupFeed
            .template()
            .render("/v10.0", Some("1"), "tok", None)
            .unwrap();
        assert!(path.ends_with("&access_token=tok&limit=20"));
    }

    #[test]
    fn non_paginated_endpoints_ignore_the_limit() {
        let path = Endpoint::AppInstalledGroups
            .template()
            .render("/v10.0", Some("app"), "tok", Some(99))
            .unwrap();
        assert_eq!(
            path,
            "/v10.0/app/app_installed_groups?fields=id%2Cname&filter=stream&access_token=tok"
        );
    }

    #[test]
    fn fixed_path_needs_no_id() {
        let path = Endpoint::UserGroups
            .template()
            .render("/v10.0", None, "tok", None)
            .unwrap();
        assert!(path.starts_with("/v10.0/me/groups?fields="));
        assert!(path.ends_with("&admin_only=true&access_token=tok"));
    }

    #[test]
    fn rejects_ids_that_escape_the_segment() {
        for id in ["", "1/feed", "1?x=y", "1#frag"] {
            let err = Endpoint::UserGroup
                .template()
                .render("/v10.0", Some(id), "tok", None)
                .unwrap_err();
            assert!(matches!(err, GraphError::InvalidNodeId(_)), "{id:?}");
        }
    }
}
