//! AKHQ tool catalog
//!
//! One tool per AKHQ API endpoint, plus the base-URL administration tools.

use crate::mcp::{Tool, ToolAction, ToolParameter};

const TOPIC_SHOW: &[&str] = &["ALL", "HIDE_INTERNAL", "HIDE_INTERNAL_STREAM", "HIDE_STREAM"];
const DATA_SORT: &[&str] = &["OLDEST", "NEWEST"];
const SEARCH_MATCH: &[&str] = &["EQUALS", "CONTAINS", "NOT_CONTAINS"];

fn cluster() -> ToolParameter {
    ToolParameter::string("cluster", "Cluster id as configured in AKHQ", true)
}

fn topic_name() -> ToolParameter {
    ToolParameter::string("topicName", "Topic name", true)
}

fn group_name() -> ToolParameter {
    ToolParameter::string("groupName", "Consumer group id", true)
}

fn node_id() -> ToolParameter {
    ToolParameter::integer("nodeId", "Broker id", true)
}

fn connect_id() -> ToolParameter {
    ToolParameter::string("connectId", "Kafka Connect cluster id", true)
}

fn connector_name() -> ToolParameter {
    ToolParameter::string("name", "Connector name", true)
}

fn subject() -> ToolParameter {
    ToolParameter::string("subject", "Schema subject", true)
}

fn search() -> ToolParameter {
    ToolParameter::string("search", "Filter on name", false)
}

fn page() -> ToolParameter {
    ToolParameter::integer("page", "Page number (1-based)", false)
}

fn body(description: &'static str) -> ToolParameter {
    ToolParameter::object("body", description, true)
}

fn cluster_tools() -> Vec<Tool> {
    vec![
        Tool::get("list_clusters", "List Kafka clusters known to AKHQ", "/api/cluster"),
        Tool::get("get_current_user", "Current AKHQ user and permissions", "/api/me"),
        Tool::get("list_nodes", "List brokers of a cluster", "/api/{cluster}/node")
            .with_parameter(cluster()),
        Tool::get("get_node", "Get one broker", "/api/{cluster}/node/{nodeId}")
            .with_parameter(cluster())
            .with_parameter(node_id()),
        Tool::get("get_node_configs", "Broker configuration", "/api/{cluster}/node/{nodeId}/configs")
            .with_parameter(cluster())
            .with_parameter(node_id()),
        Tool::post(
            "update_node_configs",
            "Update broker configuration entries",
            "/api/{cluster}/node/{nodeId}/configs",
        )
        .with_parameter(cluster())
        .with_parameter(node_id())
        .with_parameter(body("Map of config name to new value")),
        Tool::get("get_node_logs", "Log directories of a broker", "/api/{cluster}/node/{nodeId}/logs")
            .with_parameter(cluster())
            .with_parameter(node_id()),
    ]
}

fn topic_tools() -> Vec<Tool> {
    vec![
        Tool::get("list_topics", "List topics with pagination", "/api/{cluster}/topic")
            .with_parameter(cluster())
            .with_parameter(search())
            .with_parameter(ToolParameter::one_of("show", "Which topics to include", TOPIC_SHOW, false))
            .with_parameter(page()),
        Tool::get("list_topic_names", "List all topic names", "/api/{cluster}/topic/name")
            .with_parameter(cluster()),
        Tool::post("create_topic", "Create a topic", "/api/{cluster}/topic")
            .with_parameter(cluster())
            .with_parameter(body("Topic definition: name, partition, replicationFactor, configs")),
        Tool::get("get_topic", "Get topic details", "/api/{cluster}/topic/{topicName}")
            .with_parameter(cluster())
            .with_parameter(topic_name()),
        Tool::delete("delete_topic", "Delete a topic", "/api/{cluster}/topic/{topicName}")
            .with_parameter(cluster())
            .with_parameter(topic_name()),
        Tool::get(
            "get_topic_partitions",
            "Partitions of a topic",
            "/api/{cluster}/topic/{topicName}/partitions",
        )
        .with_parameter(cluster())
        .with_parameter(topic_name()),
        Tool::get(
            "get_topic_groups",
            "Consumer groups reading a topic",
            "/api/{cluster}/topic/{topicName}/groups",
        )
        .with_parameter(cluster())
        .with_parameter(topic_name()),
        Tool::get("get_topic_configs", "Topic configuration", "/api/{cluster}/topic/{topicName}/configs")
            .with_parameter(cluster())
            .with_parameter(topic_name()),
        Tool::post(
            "update_topic_configs",
            "Update topic configuration entries",
            "/api/{cluster}/topic/{topicName}/configs",
        )
        .with_parameter(cluster())
        .with_parameter(topic_name())
        .with_parameter(body("Map of config name to new value")),
        Tool::get("get_topic_logs", "Log segments of a topic", "/api/{cluster}/topic/{topicName}/logs")
            .with_parameter(cluster())
            .with_parameter(topic_name()),
        Tool::get("get_topic_acls", "ACLs applying to a topic", "/api/{cluster}/topic/{topicName}/acls")
            .with_parameter(cluster())
            .with_parameter(topic_name()),
        Tool::get(
            "get_topic_offsets_by_timestamp",
            "First offsets at or after a timestamp, per partition",
            "/api/{cluster}/topic/{topicName}/offsets/start",
        )
        .with_parameter(cluster())
        .with_parameter(topic_name())
        .with_parameter(ToolParameter::string("timestamp", "ISO-8601 timestamp", true)),
        Tool::get("get_topic_data", "Read records from a topic", "/api/{cluster}/topic/{topicName}/data")
            .with_parameter(cluster())
            .with_parameter(topic_name())
            .with_parameter(ToolParameter::string("after", "Cursor returned by the previous page", false))
            .with_parameter(ToolParameter::integer("partition", "Only read this partition", false))
            .with_parameter(ToolParameter::one_of("sort", "Read order", DATA_SORT, false))
            .with_parameter(ToolParameter::string("timestamp", "Start at this ISO-8601 timestamp", false))
            .with_parameter(ToolParameter::string("endTimestamp", "Stop at this ISO-8601 timestamp", false))
            .with_parameter(ToolParameter::string("searchByKey", "Filter on record key", false))
            .with_parameter(ToolParameter::string("searchByValue", "Filter on record value", false))
            .with_parameter(ToolParameter::string("searchByHeaderKey", "Filter on header keys", false))
            .with_parameter(ToolParameter::string("searchByHeaderValue", "Filter on header values", false))
            .with_parameter(ToolParameter::one_of("searchMatch", "How search filters match", SEARCH_MATCH, false)),
        Tool::post("produce_record", "Produce a record to a topic", "/api/{cluster}/topic/{topicName}/data")
            .with_parameter(cluster())
            .with_parameter(topic_name())
            .with_parameter(body("Record: value, key, partition, headers, keySchema, valueSchema")),
        Tool::delete(
            "empty_topic",
            "Delete all records of a topic",
            "/api/{cluster}/topic/{topicName}/data/empty",
        )
        .with_parameter(cluster())
        .with_parameter(topic_name()),
        Tool::get(
            "get_record",
            "Read a single record by partition and offset",
            "/api/{cluster}/topic/{topicName}/data/record/{partition}/{offset}",
        )
        .with_parameter(cluster())
        .with_parameter(topic_name())
        .with_parameter(ToolParameter::integer("partition", "Partition", true))
        .with_parameter(ToolParameter::integer("offset", "Offset", true)),
        Tool::get(
            "get_last_records",
            "Last record of each given topic",
            "/api/{cluster}/topic/last-record",
        )
        .with_parameter(cluster())
        .with_parameter(ToolParameter::string_array("topics", "Topic names", true)),
        Tool::get("tail_topics", "Live tail of one or more topics", "/api/{cluster}/tail/sse")
            .with_parameter(cluster())
            .with_parameter(ToolParameter::string_array("topics", "Topic names", true))
            .with_parameter(search())
            .with_parameter(ToolParameter::string("after", "Resume cursor", false)),
    ]
}

fn group_tools() -> Vec<Tool> {
    vec![
        Tool::get("list_groups", "List consumer groups with pagination", "/api/{cluster}/group")
            .with_parameter(cluster())
            .with_parameter(search())
            .with_parameter(page()),
        Tool::get("get_group", "Get consumer group details", "/api/{cluster}/group/{groupName}")
            .with_parameter(cluster())
            .with_parameter(group_name()),
        Tool::delete("delete_group", "Delete a consumer group", "/api/{cluster}/group/{groupName}")
            .with_parameter(cluster())
            .with_parameter(group_name()),
        Tool::get(
            "get_group_offsets",
            "Committed offsets and lag of a group",
            "/api/{cluster}/group/{groupName}/offsets",
        )
        .with_parameter(cluster())
        .with_parameter(group_name()),
        Tool::post(
            "update_group_offsets",
            "Reset committed offsets of a group",
            "/api/{cluster}/group/{groupName}/offsets",
        )
        .with_parameter(cluster())
        .with_parameter(group_name())
        .with_parameter(body("List of {topic, partition, offset}")),
        Tool::get(
            "get_group_offsets_by_timestamp",
            "Offsets a group would reset to for a timestamp",
            "/api/{cluster}/group/{groupName}/offsets/start",
        )
        .with_parameter(cluster())
        .with_parameter(group_name())
        .with_parameter(ToolParameter::string("timestamp", "ISO-8601 timestamp", true)),
        Tool::get("get_group_members", "Members of a group", "/api/{cluster}/group/{groupName}/members")
            .with_parameter(cluster())
            .with_parameter(group_name()),
        Tool::get("get_group_acls", "ACLs applying to a group", "/api/{cluster}/group/{groupName}/acls")
            .with_parameter(cluster())
            .with_parameter(group_name()),
    ]
}

fn acl_tools() -> Vec<Tool> {
    vec![
        Tool::get("list_acls", "List ACL principals", "/api/{cluster}/acls")
            .with_parameter(cluster())
            .with_parameter(search()),
        Tool::get("get_principal_acls", "ACLs of one principal", "/api/{cluster}/acls/{principal}")
            .with_parameter(cluster())
            .with_parameter(ToolParameter::string("principal", "Principal, e.g. User:alice", true))
            .with_parameter(ToolParameter::string("resourceType", "Restrict to a resource type", false)),
    ]
}

fn schema_tools() -> Vec<Tool> {
    vec![
        Tool::get("list_schemas", "List schema subjects with pagination", "/api/{cluster}/schema")
            .with_parameter(cluster())
            .with_parameter(search())
            .with_parameter(page()),
        Tool::post("create_schema", "Register a new subject", "/api/{cluster}/schema")
            .with_parameter(cluster())
            .with_parameter(body("Schema definition: subject, schema, schemaType, compatibilityLevel")),
        Tool::get("get_schema", "Latest version of a subject", "/api/{cluster}/schema/{subject}")
            .with_parameter(cluster())
            .with_parameter(subject()),
        Tool::post("update_schema", "Register a new version of a subject", "/api/{cluster}/schema/{subject}")
            .with_parameter(cluster())
            .with_parameter(subject())
            .with_parameter(body("Schema definition: schema, schemaType, compatibilityLevel")),
        Tool::delete("delete_schema", "Delete a subject and all its versions", "/api/{cluster}/schema/{subject}")
            .with_parameter(cluster())
            .with_parameter(subject()),
        Tool::get(
            "get_schema_versions",
            "All versions of a subject",
            "/api/{cluster}/schema/{subject}/version",
        )
        .with_parameter(cluster())
        .with_parameter(subject()),
        Tool::get(
            "get_schema_version",
            "One version of a subject",
            "/api/{cluster}/schema/{subject}/version/{version}",
        )
        .with_parameter(cluster())
        .with_parameter(subject())
        .with_parameter(ToolParameter::integer("version", "Schema version", true)),
        Tool::get("get_schema_by_id", "Schema by global id", "/api/{cluster}/schema/id/{id}")
            .with_parameter(cluster())
            .with_parameter(ToolParameter::integer("id", "Schema id", true))
            .with_parameter(ToolParameter::string("topic", "Topic the schema is used by", false)),
    ]
}

fn connect_tools() -> Vec<Tool> {
    vec![
        Tool::get("list_connectors", "List connectors of a Connect cluster", "/api/{cluster}/connect/{connectId}")
            .with_parameter(cluster())
            .with_parameter(connect_id())
            .with_parameter(search())
            .with_parameter(page()),
        Tool::get(
            "list_connect_plugins",
            "Installed connector plugins",
            "/api/{cluster}/connect/{connectId}/plugins",
        )
        .with_parameter(cluster())
        .with_parameter(connect_id()),
        Tool::get("get_connector", "Get connector definition", "/api/{cluster}/connect/{connectId}/{name}")
            .with_parameter(cluster())
            .with_parameter(connect_id())
            .with_parameter(connector_name()),
        Tool::get(
            "get_connector_tasks",
            "Tasks of a connector",
            "/api/{cluster}/connect/{connectId}/{name}/tasks",
        )
        .with_parameter(cluster())
        .with_parameter(connect_id())
        .with_parameter(connector_name()),
        Tool::get(
            "restart_connector",
            "Restart a connector",
            "/api/{cluster}/connect/{connectId}/{name}/restart",
        )
        .with_parameter(cluster())
        .with_parameter(connect_id())
        .with_parameter(connector_name()),
        Tool::get("pause_connector", "Pause a connector", "/api/{cluster}/connect/{connectId}/{name}/pause")
            .with_parameter(cluster())
            .with_parameter(connect_id())
            .with_parameter(connector_name()),
        Tool::get(
            "resume_connector",
            "Resume a paused connector",
            "/api/{cluster}/connect/{connectId}/{name}/resume",
        )
        .with_parameter(cluster())
        .with_parameter(connect_id())
        .with_parameter(connector_name()),
    ]
}

fn admin_tools() -> Vec<Tool> {
    vec![
        Tool::local("get_base_url", "Show the AKHQ base URL used for requests", ToolAction::GetBaseUrl),
        Tool::local("set_base_url", "Point the adapter at another AKHQ instance", ToolAction::SetBaseUrl)
            .with_parameter(ToolParameter::string("url", "New base URL, e.g. http://akhq:8080", true)),
    ]
}

/// Every tool, in the order they are listed to clients
pub fn akhq_tools() -> Vec<Tool> {
    let mut tools = Vec::new();
    tools.extend(cluster_tools());
    tools.extend(topic_tools());
    tools.extend(group_tools());
    tools.extend(acl_tools());
    tools.extend(schema_tools());
    tools.extend(connect_tools());
    tools.extend(admin_tools());
    tools
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::{HttpMethod, ToolRegistry};
    use crate::templater::{placeholders, BODY_KEY};

    #[test]
    fn test_names_unique() {
        let mut registry = ToolRegistry::new();
        registry.register_all(akhq_tools()).unwrap();
        assert_eq!(registry.len(), akhq_tools().len());
    }

    #[test]
    fn test_placeholders_are_required_parameters() {
        for tool in akhq_tools() {
            let ToolAction::Http { endpoint, .. } = tool.action else {
                continue;
            };
            for name in placeholders(endpoint) {
                let param = tool.parameters.iter().find(|p| p.name == name);
                assert!(
                    param.is_some_and(|p| p.required),
                    "{}: placeholder {{{}}} has no required parameter",
                    tool.name,
                    name
                );
            }
        }
    }

    #[test]
    fn test_body_only_on_write_methods() {
        for tool in akhq_tools() {
            let has_body = tool.parameters.iter().any(|p| p.name == BODY_KEY);
            if let ToolAction::Http { method, .. } = tool.action {
                if has_body {
                    assert!(
                        matches!(method, HttpMethod::Post | HttpMethod::Put),
                        "{} declares a body on {}",
                        tool.name,
                        method
                    );
                }
            }
        }
    }

    #[test]
    fn test_parameter_names_unique_per_tool() {
        for tool in akhq_tools() {
            let mut names: Vec<&str> = tool.parameters.iter().map(|p| p.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), tool.parameters.len(), "{}", tool.name);
        }
    }

    #[test]
    fn test_admin_tools_present() {
        let tools = akhq_tools();
        assert!(tools.iter().any(|t| t.action == ToolAction::GetBaseUrl));
        assert!(tools.iter().any(|t| t.action == ToolAction::SetBaseUrl));
    }
}
