//! Fixed blacklists and path tables used by the probes.

/// Root management apps (superuser frontends and rooting toolkits).
pub const ROOT_MANAGEMENT_APPS: &[&str] = &[
    "com.noshufou.android.su",
    "com.noshufou.android.su.elite",
    "eu.chainfire.supersu",
    "com.koushikdutta.superuser",
    "com.thirdparty.superuser",
    "com.yellowes.su",
    "com.topjohnwu.magisk",
    "com.kingroot.kinguser",
    "com.kingo.root",
    "com.smedialink.oneclickroot",
    "com.zhiqupk.root.global",
    "com.alephzain.framaroot",
];

/// Apps that are dangerous in combination with root access.
pub const DANGEROUS_APPS: &[&str] = &[
    "com.koushikdutta.rommanager",
    "com.koushikdutta.rommanager.license",
    "com.dimonvideo.luckypatcher",
    "com.chelpus.lackypatch",
    "com.ramdroid.appquarantine",
    "com.ramdroid.appquarantinepro",
];

/// Apps whose purpose is hiding root access from detectors.
pub const ROOT_CLOAKING_APPS: &[&str] = &[
    "com.devadvance.rootcloak",
    "com.devadvance.rootcloakplus",
    "de.robv.android.xposed.installer",
    "com.saurik.substrate",
    "com.zachspong.temprootremovejb",
    "com.amphoras.hidemyroot",
    "com.amphoras.hidemyrootadfree",
    "com.formyhm.hiderootPremium",
    "com.formyhm.hideroot",
];

/// Directories commonly holding privileged binaries. Trailing slashes
/// are deliberate: candidate paths are built by direct concatenation.
pub const SU_PATHS: &[&str] = &[
    "/data/local/",
    "/data/local/bin/",
    "/data/local/xbin/",
    "/sbin/",
    "/su/bin/",
    "/system/bin/",
    "/system/bin/.ext/",
    "/system/bin/failsafe/",
    "/system/sd/xbin/",
    "/system/usr/we-need-root/",
    "/system/xbin/",
];

/// Mount points that must never be writable on an untampered device.
pub const PATHS_THAT_SHOULD_NOT_BE_WRITABLE: &[&str] = &[
    "/system",
    "/system/bin",
    "/system/sbin",
    "/system/xbin",
    "/vendor/bin",
    "/sbin",
    "/etc",
];

/// Sensitive property keys and the values that flag a device as unsafe.
pub const DANGEROUS_PROPS: &[(&str, &str)] = &[("ro.debuggable", "1"), ("ro.secure", "0")];
