// Systemd state vocabulary -> numeric code tables
//
// Values follow the state tables in systemd's src/basic/unit-def.c. Strings
// that appear in more than one table there are kept only at their first
// occurrence, so every table is a bijection.

/// Code for the "null" sentinel in the load, active and file tables
pub const NULL_CODE: u16 = 10;

/// Code for the "null" sentinel in the sub-state table
pub const NULL_SUB_CODE: u16 = 0x00ff;

/// A closed, immutable mapping from systemd vocabulary to codes
#[derive(Debug)]
pub struct CodeTable {
    name: &'static str,
    entries: &'static [(&'static str, u16)],
}

impl CodeTable {
    /// Name of the metric tag/field this table encodes
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Look up the code for a state string
    pub fn lookup(&self, key: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, code)| *code)
    }

    /// Map a code back to the state string it was produced from
    pub fn reverse(&self, code: u16) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(k, _)| *k)
    }

    pub fn entries(&self) -> &'static [(&'static str, u16)] {
        self.entries
    }
}

pub static LOAD_STATES: CodeTable = CodeTable {
    name: "load",
    entries: &[
        ("loaded", 0),
        ("stub", 1),
        ("not-found", 2),
        ("bad-setting", 3),
        ("error", 4),
        ("merged", 5),
        ("masked", 6),
        ("null", NULL_CODE),
    ],
};

pub static ACTIVE_STATES: CodeTable = CodeTable {
    name: "active",
    entries: &[
        ("active", 0),
        ("reloading", 1),
        ("inactive", 2),
        ("failed", 3),
        ("activating", 4),
        ("deactivating", 5),
        ("null", NULL_CODE),
    ],
};

pub static UNIT_FILE_STATES: CodeTable = CodeTable {
    name: "state",
    entries: &[
        ("disabled", 0),
        ("enabled", 1),
        ("enabled-runtime", 2),
        ("generated", 3),
        ("indirect", 4),
        ("masked", 5),
        ("static", 6),
        ("transient", 7),
        ("null", NULL_CODE),
    ],
};

pub static SUB_STATES: CodeTable = CodeTable {
    name: "sub",
    entries: &[
        // service, 0x0000
        ("running", 0x0000),
        ("dead", 0x0001),
        ("start-pre", 0x0002),
        ("start", 0x0003),
        ("exited", 0x0004),
        ("reload", 0x0005),
        ("stop", 0x0006),
        ("stop-watchdog", 0x0007),
        ("stop-sigterm", 0x0008),
        ("stop-sigkill", 0x0009),
        ("stop-post", 0x000a),
        ("final-sigterm", 0x000b),
        ("failed", 0x000c),
        ("auto-restart", 0x000d),
        // automount, 0x0010
        ("waiting", 0x0010),
        // device, 0x0020
        ("tentative", 0x0020),
        ("plugged", 0x0021),
        // mount, 0x0030
        ("mounting", 0x0030),
        ("mounting-done", 0x0031),
        ("mounted", 0x0032),
        ("remounting", 0x0033),
        ("unmounting", 0x0034),
        ("remounting-sigterm", 0x0035),
        ("remounting-sigkill", 0x0036),
        ("unmounting-sigterm", 0x0037),
        ("unmounting-sigkill", 0x0038),
        // path, 0x0040: nothing new
        // scope, 0x0050
        ("abandoned", 0x0050),
        // slice, 0x0060
        ("active", 0x0060),
        // socket, 0x0070
        ("start-chown", 0x0070),
        ("start-post", 0x0071),
        ("listening", 0x0072),
        ("stop-pre", 0x0073),
        ("stop-pre-sigterm", 0x0074),
        ("stop-pre-sigkill", 0x0075),
        ("final-sigkill", 0x0076),
        // swap, 0x0080
        ("activating", 0x0080),
        ("activating-done", 0x0081),
        ("deactivating", 0x0082),
        ("deactivating-sigterm", 0x0083),
        ("deactivating-sigkill", 0x0084),
        // target, 0x0090: nothing new
        // timer, 0x00a0
        ("elapsed", 0x00a0),
        ("null", NULL_SUB_CODE),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_load_codes() {
        let expected = [
            ("loaded", 0),
            ("stub", 1),
            ("not-found", 2),
            ("bad-setting", 3),
            ("error", 4),
            ("merged", 5),
            ("masked", 6),
            ("null", 10),
        ];
        for (key, code) in expected {
            assert_eq!(LOAD_STATES.lookup(key), Some(code), "load {}", key);
        }
        assert_eq!(LOAD_STATES.entries().len(), expected.len());
    }

    #[test]
    fn test_active_codes() {
        let expected = [
            ("active", 0),
            ("reloading", 1),
            ("inactive", 2),
            ("failed", 3),
            ("activating", 4),
            ("deactivating", 5),
            ("null", 10),
        ];
        for (key, code) in expected {
            assert_eq!(ACTIVE_STATES.lookup(key), Some(code), "active {}", key);
        }
        assert_eq!(ACTIVE_STATES.entries().len(), expected.len());
    }

    #[test]
    fn test_unit_file_codes() {
        let expected = [
            ("disabled", 0),
            ("enabled", 1),
            ("enabled-runtime", 2),
            ("generated", 3),
            ("indirect", 4),
            ("masked", 5),
            ("static", 6),
            ("transient", 7),
            ("null", 10),
        ];
        for (key, code) in expected {
            assert_eq!(UNIT_FILE_STATES.lookup(key), Some(code), "state {}", key);
        }
        assert_eq!(UNIT_FILE_STATES.entries().len(), expected.len());
    }

    #[test]
    fn test_sub_codes() {
        let expected = [
            ("running", 0x00),
            ("dead", 0x01),
            ("start-pre", 0x02),
            ("start", 0x03),
            ("exited", 0x04),
            ("reload", 0x05),
            ("stop", 0x06),
            ("stop-watchdog", 0x07),
            ("stop-sigterm", 0x08),
            ("stop-sigkill", 0x09),
            ("stop-post", 0x0a),
            ("final-sigterm", 0x0b),
            ("failed", 0x0c),
            ("auto-restart", 0x0d),
            ("waiting", 0x10),
            ("tentative", 0x20),
            ("plugged", 0x21),
            ("mounting", 0x30),
            ("mounting-done", 0x31),
            ("mounted", 0x32),
            ("remounting", 0x33),
            ("unmounting", 0x34),
            ("remounting-sigterm", 0x35),
            ("remounting-sigkill", 0x36),
            ("unmounting-sigterm", 0x37),
            ("unmounting-sigkill", 0x38),
            ("abandoned", 0x50),
            ("active", 0x60),
            ("start-chown", 0x70),
            ("start-post", 0x71),
            ("listening", 0x72),
            ("stop-pre", 0x73),
            ("stop-pre-sigterm", 0x74),
            ("stop-pre-sigkill", 0x75),
            ("final-sigkill", 0x76),
            ("activating", 0x80),
            ("activating-done", 0x81),
            ("deactivating", 0x82),
            ("deactivating-sigterm", 0x83),
            ("deactivating-sigkill", 0x84),
            ("elapsed", 0xa0),
            ("null", 0xff),
        ];
        for (key, code) in expected {
            assert_eq!(SUB_STATES.lookup(key), Some(code), "sub {}", key);
        }
        assert_eq!(SUB_STATES.entries().len(), expected.len());
    }

    #[test]
    fn test_unknown_keys_miss() {
        assert_eq!(ACTIVE_STATES.lookup("bogus"), None);
        assert_eq!(LOAD_STATES.lookup("Loaded"), None);
        assert_eq!(SUB_STATES.lookup(""), None);
        assert_eq!(UNIT_FILE_STATES.lookup("alias"), None);
    }

    #[test]
    fn test_tables_are_bijections() {
        for table in [&LOAD_STATES, &ACTIVE_STATES, &UNIT_FILE_STATES, &SUB_STATES] {
            let keys: HashSet<_> = table.entries().iter().map(|(k, _)| *k).collect();
            let codes: HashSet<_> = table.entries().iter().map(|(_, c)| *c).collect();
            assert_eq!(keys.len(), table.entries().len(), "duplicate key in {}", table.name());
            assert_eq!(codes.len(), table.entries().len(), "duplicate code in {}", table.name());

            for (key, _) in table.entries() {
                let code = table.lookup(key).unwrap();
                assert_eq!(table.reverse(code), Some(*key));
            }
        }
    }

    #[test]
    fn test_sub_codes_stay_in_family_blocks() {
        // Everything but the sentinel sits below the timer block's end
        for (key, code) in SUB_STATES.entries() {
            if *key != "null" {
                assert!(*code < 0x00b0, "{} out of range", key);
            }
        }
        assert_eq!(SUB_STATES.reverse(0x0040), None);
        assert_eq!(SUB_STATES.reverse(0x0090), None);
    }
}
