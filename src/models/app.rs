use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub display_name: String,
}

/// Runtime state of an installed application, fetched fresh on every call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    #[serde(flatten)]
    pub application: Application,
    pub date: String,
    pub version: String,
    pub build: String,
    pub status: String,
    pub boot_run_status: String,
    pub shutdown_stop_status: String,
    pub enabled: bool,
    pub installed: bool,
}

/// Full snapshot of an installed package, including its installation metadata.
///
/// Fields skipped by serde are only meaningful to the NAS web UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetails {
    #[serde(flatten)]
    pub state: ApplicationState,
    pub qpkg_file: String,
    pub install_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub config_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub shell_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub shell: String,
    #[serde(skip)]
    pub serv_port: String,
    #[serde(skip)]
    pub unofficial: String,
    #[serde(skip)]
    pub incomplete_conf: String,
    pub web_port: i64,
    #[serde(rename = "webSSLPort")]
    pub web_ssl_port: i64,
    #[serde(skip)]
    pub web_ui: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub provider: String,
    pub author: String,
    #[serde(skip)]
    pub visible: String,
    #[serde(skip)]
    pub force_visible: String,
    #[serde(skip)]
    pub task_info: String,
    pub sys_app: bool,
    #[serde(skip)]
    pub desktop: String,
    #[serde(skip)]
    pub class: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub store: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_data_path: String,
    #[serde(skip)]
    pub open_in: String,
    #[serde(skip)]
    pub add_on: String,
    #[serde(skip)]
    pub login_screen: String,
    #[serde(skip)]
    pub volume_select: String,
    #[serde(skip)]
    pub app_route: String,
    #[serde(skip)]
    pub app_route_rule: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fw_ver_max: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fw_ver_min: String,
    #[serde(skip)]
    pub code_signing_status: String,
    #[serde(skip)]
    pub dep_cnt: String,
    #[serde(skip)]
    pub dep_list: String,
}

/// The background task the NAS is currently running on some package, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationTaskStatus {
    /// True iff the server reported a non-empty task name.
    pub is_running: bool,
    pub name: String,
    pub display_name: String,
    pub filename: String,
    pub store: String,
    pub op_code: String,
    pub st_code: String,
    pub class: String,
    pub category: String,
    pub version: String,
    pub download_percent: String,
    pub operation: String,
    pub is_update: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_json_is_flat_and_hides_ui_fields() {
        let details = ApplicationDetails {
            state: ApplicationState {
                application: Application {
                    id: "container-station".into(),
                    display_name: "Container Station".into(),
                },
                enabled: true,
                ..Default::default()
            },
            web_ssl_port: 443,
            desktop: "1".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["id"], "container-station");
        assert_eq!(json["displayName"], "Container Station");
        assert_eq!(json["enabled"], true);
        assert_eq!(json["webSSLPort"], 443);
        assert!(json.get("desktop").is_none());
        assert!(json.get("configPath").is_none());
    }
}
