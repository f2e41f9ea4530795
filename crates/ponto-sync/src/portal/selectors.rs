//! Selector strings for the Pontomais web UI.
//!
//! These are brittle positional selectors into a third-party Angular app.
//! A markup change on the portal side lands here and nowhere else; the
//! orchestration code only sees the capability methods on [`super::Portal`].

pub const LOGIN_URL: &str = "https://app2.pontomais.com.br/login";

/// Report type typed into the searchable dropdown.
pub const AUDIT_REPORT_NAME: &str = "Auditoria";

// Login form (CSS)
pub const USERNAME_INPUT: &str = "#container-login > div.left-content > div > div:nth-child(4) > div:nth-child(1) > login-form > pm-form > form > div > div > div:nth-child(1) > pm-input > div > div > pm-text > div > input";
pub const PASSWORD_INPUT: &str = "#container-login > div.left-content > div > div:nth-child(4) > div:nth-child(1) > login-form > pm-form > form > div > div > div.password-field.pm-input-form.col-sm-18.col-xs-18 > pm-input > div > div > pm-password > div > input";
pub const LOGIN_SUBMIT: &str = "#container-login > div.left-content > div > div:nth-child(4) > div:nth-child(1) > login-form > pm-button.size.mt-3.pm-spining-btn > button > span > span";

// Side navigation (CSS)
pub const REPORTS_MENU: &str = "body > app-mfe-remote > app-side-nav-outer-toolbar > dx-drawer > div > div.dx-drawer-panel-content > app-side-navigation-menu > div > dx-tree-view:nth-child(1) > div > div > div > div.dx-scrollable-content > ul > li:nth-child(9) > div > div.dx-template-wrapper.dx-item-content.dx-treeview-item-content > a";

// Report type dropdown (XPath)
pub const REPORT_TYPE_DROPDOWN: &str = "/html/body/app-mfe-remote/app-side-nav-outer-toolbar/dx-drawer/div/div[2]/dx-scroll-view/div[1]/div/div[1]/div[2]/div[1]/app-container/reports/div/div[1]/div/pm-card/div/div[2]/pm-form/form/div[2]/div/div[1]/pm-input/div/div/pm-select/div/ng-select/div/span";
pub const REPORT_TYPE_SEARCH: &str = "/html/body/ng-dropdown-panel/div[1]/div/input";
pub const REPORT_TYPE_OPTION: &str = "/html/body/ng-dropdown-panel/div[2]/div[2]/div/div/div/div[2]/span";

// Optional-columns modal (XPath)
pub const COLUMNS_BUTTON: &str = "/html/body/app-mfe-remote/app-side-nav-outer-toolbar/dx-drawer/div/div[2]/dx-scroll-view/div[1]/div/div[1]/div[2]/div[1]/app-container/reports/div/div[2]/div[1]/div/div[1]/pm-button/button/span";
pub const COLUMNS_SELECT_ALL: &str = "/html/body/ngb-modal-window/div/div/pm-modal-multi-select-modal/div[2]/div/div/div[1]/pm-form/form/div[2]/div/div/pm-input/div/div/pm-checkbox/ul/li/label/input";
pub const COLUMNS_CONFIRM: &str = "/html/body/ngb-modal-window/div/div/pm-modal-multi-select-modal/div[2]/div/div/div[2]/pm-button/button/span";

// Filter controls (CSS)
pub const DATE_RANGE_INPUT: &str = "pm-date-range.pm-input > div:nth-child(2) > input:nth-child(1)";
pub const APPLY_FILTER: &str = ".pm-dropdown > pm-button:nth-child(1) > button:nth-child(1) > span:nth-child(1)";

// Export trigger (CSS)
pub const EXPORT_BUTTON: &str = "#relatorios-baixar-xls";
