//! PHP scripts fed to the interpreter on stdin
//!
//! Both scripts run with the install directory as working directory, which the
//! application's relative includes rely on.

use crate::host::RepairScope;
use crate::invoker::REPAIR_MARKER;
use common::php;

/// Files a usable installation must contain, relative to the install dir.
pub const ENTRY_POINT: &str = "include/entryPoint.php";
pub const REPAIR_MODULE: &str = "modules/Administration/QuickRepairAndRebuild.php";
pub const CONFIG_FILE: &str = "config.php";

/// Prints the configuration values the run needs as one JSON object.
pub const CONFIG_DUMP: &str = r#"<?php
if (!defined('sugarEntry')) define('sugarEntry', true);
$sugar_config = array();
require 'config.php';
if (is_file('config_override.php')) {
    require 'config_override.php';
}
echo json_encode(array(
    'site_url' => isset($sugar_config['site_url']) ? $sugar_config['site_url'] : null,
    'default_language' => isset($sugar_config['default_language']) ? $sugar_config['default_language'] : null,
));
"#;

/// The repair session, filled in step by step and rendered at dispatch.
#[derive(Debug, Clone, Default)]
pub struct SessionScript {
    pub app_list_strings_language: Option<String>,
    pub app_strings_language: Option<String>,
    pub system_user: bool,
}

impl SessionScript {
    /// Render the session for `scope`.
    ///
    /// The tail runs the application's own cleanup and then disconnects the
    /// database again if the manager class is loaded, since jobs may have
    /// consumed the one allowed cleanup call already.
    pub fn render(&self, scope: RepairScope) -> String {
        let mut out = String::from("<?php\n");
        out.push_str("if (!defined('sugarEntry')) define('sugarEntry', true);\n");
        out.push_str(&format!("require_once({});\n", php::quote(ENTRY_POINT)));
        out.push_str(&format!("require_once({});\n", php::quote(REPAIR_MODULE)));
        out.push_str("global $current_language, $app_list_strings, $app_strings, $current_user;\n");

        if let Some(language) = &self.app_list_strings_language {
            out.push_str(&format!(
                "$app_list_strings = return_app_list_strings_language({});\n",
                php::quote(language)
            ));
        }
        if let Some(language) = &self.app_strings_language {
            out.push_str(&format!("$current_language = {};\n", php::quote(language)));
            out.push_str("$app_strings = return_application_language($current_language);\n");
        }
        if self.system_user {
            out.push_str("$current_user = new User();\n");
            out.push_str("$current_user->getSystemUser();\n");
        }

        out.push_str(&format!(
            "$GLOBALS['log']->debug({});\n",
            php::quote(REPAIR_MARKER)
        ));
        out.push_str("$repair = new RepairAndClear();\n");
        out.push_str(&format!(
            "$repair->repairAndClearAll(array('clearAll'), {}, true, false);\n",
            modules(scope)
        ));
        out.push_str("sugar_cleanup(false);\n");
        out.push_str("if (class_exists('DBManagerFactory')) {\n");
        out.push_str("    DBManagerFactory::getInstance()->disconnect();\n");
        out.push_str("}\n");
        out.push_str("exit(0);\n");
        out
    }
}

fn modules(scope: RepairScope) -> &'static str {
    match scope {
        RepairScope::AllModules => "array(translate('LBL_ALL_MODULES'))",
    }
}
