use serde::Deserialize;
use std::mem::take;

use crate::client::{BaseClient, RequestSpec};
use crate::models::{
    Application, ApplicationDetails, ApplicationState, ApplicationTaskStatus, ClientSettings,
};
use crate::utils::xml::{decode_document, ensure_auth_passed, filter_null, lenient_int};
use crate::utils::{ClientResult, Error, ErrorKind};

pub const DEFAULT_BASE_PATH: &str = "/cgi-bin/application/appRequest.cgi";

const LIST: &str = "apps.Client#List";
const LIST_STATES: &str = "apps.Client#ListStates";
const START: &str = "apps.Client#Start";
const STOP: &str = "apps.Client#Stop";
const TASK_STATUS: &str = "apps.Client#getAppTaskStatus";

#[derive(Debug, Default, Deserialize)]
#[serde(rename = "QDocRoot", default)]
struct AppListDocument {
    #[serde(rename = "authPassed", deserialize_with = "lenient_int")]
    auth_passed: i64,
    func: AppListFunc,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppListFunc {
    #[serde(rename = "ownContent")]
    own_content: AppListContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppListContent {
    #[serde(rename = "qItem")]
    items: Vec<QItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QItem {
    name: String,
    attr: QItemAttr,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct QItemAttr {
    display_name: String,
    #[serde(rename = "QPKGFile")]
    qpkg_file: String,
    date: String,
    version: String,
    build: String,
    install_path: String,
    config_path: String,
    shell_path: String,
    shell: String,
    enable: String,
    installed: String,
    serv_port: String,
    unofficial: String,
    #[serde(rename = "incomplete_conf")]
    incomplete_conf: String,
    #[serde(deserialize_with = "lenient_int")]
    web_port: i64,
    #[serde(rename = "webSSLPort", deserialize_with = "lenient_int")]
    web_ssl_port: i64,
    #[serde(rename = "webUI")]
    web_ui: String,
    provider: String,
    author: String,
    visible: String,
    #[serde(rename = "force_visible")]
    force_visible: String,
    #[serde(rename = "task_info")]
    task_info: String,
    #[serde(deserialize_with = "lenient_int")]
    sys_app: i64,
    desktop: String,
    class: String,
    store: String,
    status: String,
    user_data_path: String,
    open_in: String,
    add_on: String,
    login_screen: String,
    #[serde(rename = "volume_select")]
    volume_select: String,
    #[serde(rename = "app_route")]
    app_route: String,
    #[serde(rename = "app_route_rule")]
    app_route_rule: String,
    #[serde(rename = "boot_run_status")]
    boot_run_status: String,
    #[serde(rename = "shutdown_stop_status")]
    shutdown_stop_status: String,
    #[serde(rename = "fw_ver_max")]
    fw_ver_max: String,
    #[serde(rename = "fw_ver_min")]
    fw_ver_min: String,
    #[serde(rename = "code_signing_status")]
    code_signing_status: String,
    #[serde(rename = "dep_cnt")]
    dep_cnt: String,
    #[serde(rename = "dep_list")]
    dep_list: String,
}

impl QItem {
    /// Moves the state fields out of the item, leaving the rest of `attr` in place.
    fn take_state(&mut self) -> ApplicationState {
        let attr = &mut self.attr;
        ApplicationState {
            application: Application {
                id: filter_null(take(&mut self.name)),
                display_name: filter_null(take(&mut attr.display_name)),
            },
            date: filter_null(take(&mut attr.date)),
            version: filter_null(take(&mut attr.version)),
            build: filter_null(take(&mut attr.build)),
            status: filter_null(take(&mut attr.status)),
            boot_run_status: filter_null(take(&mut attr.boot_run_status)),
            shutdown_stop_status: filter_null(take(&mut attr.shutdown_stop_status)),
            enabled: attr.enable == "TRUE",
            installed: attr.installed == "1",
        }
    }

    fn into_details(mut self) -> ApplicationDetails {
        let state = self.take_state();
        let a = self.attr;
        ApplicationDetails {
            state,
            qpkg_file: filter_null(a.qpkg_file),
            install_path: filter_null(a.install_path),
            config_path: filter_null(a.config_path),
            shell_path: filter_null(a.shell_path),
            shell: filter_null(a.shell),
            serv_port: filter_null(a.serv_port),
            unofficial: filter_null(a.unofficial),
            incomplete_conf: filter_null(a.incomplete_conf),
            web_port: a.web_port,
            web_ssl_port: a.web_ssl_port,
            web_ui: filter_null(a.web_ui),
            provider: filter_null(a.provider),
            author: filter_null(a.author),
            visible: filter_null(a.visible),
            force_visible: filter_null(a.force_visible),
            task_info: filter_null(a.task_info),
            sys_app: a.sys_app == 1,
            desktop: filter_null(a.desktop),
            class: filter_null(a.class),
            store: filter_null(a.store),
            user_data_path: filter_null(a.user_data_path),
            open_in: filter_null(a.open_in),
            add_on: filter_null(a.add_on),
            login_screen: filter_null(a.login_screen),
            volume_select: filter_null(a.volume_select),
            app_route: filter_null(a.app_route),
            app_route_rule: filter_null(a.app_route_rule),
            fw_ver_max: filter_null(a.fw_ver_max),
            fw_ver_min: filter_null(a.fw_ver_min),
            code_signing_status: filter_null(a.code_signing_status),
            dep_cnt: filter_null(a.dep_cnt),
            dep_list: filter_null(a.dep_list),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename = "QDocRoot", default)]
struct AckDocument {
    #[serde(rename = "authPassed", deserialize_with = "lenient_int")]
    auth_passed: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename = "QDocRoot", default)]
struct TaskStatusDocument {
    #[serde(rename = "authPassed", deserialize_with = "lenient_int")]
    auth_passed: i64,
    func: TaskStatusFunc,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TaskStatusFunc {
    #[serde(rename = "ownContent")]
    own_content: TaskStatusContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TaskStatusContent {
    app: OperatingTask,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OperatingTask {
    name: String,
    display_name: String,
    filename: String,
    store: String,
    op_code: String,
    st_code: String,
    class: String,
    category: String,
    version: String,
    #[serde(rename = "downloadPercent")]
    download_percent: String,
    operation: String,
    #[serde(rename = "isUpdate")]
    is_update: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskAction {
    Start,
    Stop,
}

impl TaskAction {
    fn operation(self) -> &'static str {
        match self {
            TaskAction::Start => START,
            TaskAction::Stop => STOP,
        }
    }

    fn apply_code(self) -> &'static str {
        match self {
            TaskAction::Start => "3",
            TaskAction::Stop => "4",
        }
    }

    fn past_participle(self) -> &'static str {
        match self {
            TaskAction::Start => "started",
            TaskAction::Stop => "stopped",
        }
    }
}

/// Lists, starts and stops installed QPKG applications.
#[derive(Clone)]
pub struct AppsClient {
    base: BaseClient,
}

impl AppsClient {
    pub fn new(settings: &ClientSettings) -> ClientResult<Self> {
        let base = BaseClient::new(settings, DEFAULT_BASE_PATH)
            .map_err(|kind| Error::new("apps.Client#New", kind))?;
        Ok(Self { base })
    }

    pub fn with_base(base: BaseClient) -> Self {
        Self { base }
    }

    /// Scope every request to a session obtained from `AuthClient::login`.
    ///
    /// The sid is stored on this client value and sent as a `sid` query
    /// parameter. This is the only session state any client holds; nothing is
    /// shared between clients and nothing is refreshed or invalidated for you.
    pub fn with_session_id(self, sid: impl Into<String>) -> Self {
        Self {
            base: self.base.with_session_id(sid),
        }
    }

    pub async fn list(&self) -> ClientResult<Vec<ApplicationDetails>> {
        self.base
            .execute(LIST, reload_request(), |body| {
                let items = parse_app_list(body)?;
                Ok(items.into_iter().map(QItem::into_details).collect())
            })
            .await
    }

    pub async fn list_states(&self) -> ClientResult<Vec<ApplicationState>> {
        self.base
            .execute(LIST_STATES, reload_request(), |body| {
                let items = parse_app_list(body)?;
                Ok(items.into_iter().map(|mut item| item.take_state()).collect())
            })
            .await
    }

    /// Start `qname`. Unless `dont_wait` is set, block until the NAS reports
    /// no running package task or the poll budget is spent.
    pub async fn start(&self, qname: &str, dont_wait: bool) -> ClientResult<()> {
        self.run_task(TaskAction::Start, qname, dont_wait).await
    }

    pub async fn stop(&self, qname: &str, dont_wait: bool) -> ClientResult<()> {
        self.run_task(TaskAction::Stop, qname, dont_wait).await
    }

    async fn run_task(&self, action: TaskAction, qname: &str, dont_wait: bool) -> ClientResult<()> {
        let spec = RequestSpec::post()
            .form("subfunc", "qpkg")
            .form("apply", action.apply_code())
            .form("block", "0")
            .form("qname", qname);

        self.base
            .execute(action.operation(), spec, |body| {
                let doc: AckDocument = decode_document(body)?;
                ensure_auth_passed(doc.auth_passed, ErrorKind::AuthFailed)
            })
            .await?;

        if dont_wait {
            return Ok(());
        }

        self.wait_for_task(action, qname).await?;
        log::info!("{}: application {} {}", action.operation(), qname, action.past_participle());
        Ok(())
    }

    async fn wait_for_task(&self, action: TaskAction, qname: &str) -> ClientResult<()> {
        let attempts = self.base.poll_attempts;
        for check in 1..=attempts {
            let status = self.app_task_status().await?;
            if !status.is_running {
                return Ok(());
            }

            log::debug!(
                "{}: task {} still running ({}), check {}/{}",
                action.operation(),
                status.name,
                status.operation,
                check,
                attempts
            );
            tokio::time::sleep(self.base.poll_interval).await;
        }

        Err(Error::new(
            action.operation(),
            ErrorKind::Timeout {
                qname: qname.to_string(),
                action: action.past_participle().to_string(),
            },
        ))
    }

    /// The package task the NAS is currently busy with, if any.
    pub(crate) async fn app_task_status(&self) -> ClientResult<ApplicationTaskStatus> {
        let spec = RequestSpec::get()
            .query("subfunc", "qpkg")
            .query("apply", "1")
            .query("getstatus", "2")
            .query("get_operating_task", "1");

        self.base.execute(TASK_STATUS, spec, parse_task_status).await
    }
}

/// `list` and `list_states` share this request; only the mapping differs.
fn reload_request() -> RequestSpec {
    RequestSpec::post()
        .form("subfunc", "qpkg")
        .form("apply", "10")
        .form("action", "reload")
        .form("lang", "eng")
}

fn parse_app_list(body: &str) -> Result<Vec<QItem>, ErrorKind> {
    let doc: AppListDocument = decode_document(body)?;
    ensure_auth_passed(doc.auth_passed, ErrorKind::AuthFailed)?;
    Ok(doc.func.own_content.items)
}

fn parse_task_status(body: &str) -> Result<ApplicationTaskStatus, ErrorKind> {
    let doc: TaskStatusDocument = decode_document(body)?;
    ensure_auth_passed(doc.auth_passed, ErrorKind::AuthFailed)?;

    let task = doc.func.own_content.app;
    Ok(ApplicationTaskStatus {
        is_running: !task.name.is_empty(),
        name: task.name,
        display_name: task.display_name,
        filename: task.filename,
        store: task.store,
        op_code: task.op_code,
        st_code: task.st_code,
        class: task.class,
        category: task.category,
        version: task.version,
        download_percent: task.download_percent,
        operation: task.operation,
        is_update: task.is_update == "1",
    })
}
