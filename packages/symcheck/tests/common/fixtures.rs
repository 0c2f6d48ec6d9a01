//! C fixture sources
//!
//! The two abduction regression fixtures, verbatim, plus a generator for the
//! same program at any `<stdint.h>` width.

/// `tests/abduction/cFiles8bit/test-abdpaper-8.c`
pub const ABDPAPER_8: &str = r#"#include <stdint.h>
#include <crucible.h>

int main() {
  int8_t x = crucible_int8_t("x");
  int8_t y = crucible_int8_t("y");
  int8_t z = crucible_int8_t("z");
  assuming(y > 0);
  check(x + y + z > 0);
  return 0;
}"#;

/// `tests/abduction/cFiles32bit/test-abdpaper-32.c`
pub const ABDPAPER_32: &str = r#"#include <stdint.h>
#include <crucible.h>

int main() {
  int32_t x = crucible_int32_t("x");
  int32_t y = crucible_int32_t("y");
  int32_t z = crucible_int32_t("z");
  assuming(y > 0);
  check(x + y + z > 0);
  return 0;
}"#;

/// The abdpaper fixture for type `c_type` (e.g. "int16_t", "uint64_t")
pub fn abdpaper_source(c_type: &str) -> String {
    format!(
        "#include <stdint.h>\n#include <crucible.h>\n\nint main() {{\n  \
         {t} x = crucible_{t}(\"x\");\n  \
         {t} y = crucible_{t}(\"y\");\n  \
         {t} z = crucible_{t}(\"z\");\n  \
         assuming(y > 0);\n  \
         check(x + y + z > 0);\n  \
         return 0;\n}}\n",
        t = c_type
    )
}

/// Fixture with one proved, one disproved and one more proved check
pub const MIXED_CHECKS: &str = r#"#include <stdint.h>
#include <crucible.h>

int main() {
  uint8_t a = crucible_uint8_t("a");
  assuming(a < 100);
  check(a < 200);
  check(a + a < 100);
  uint8_t twice = a + a;
  check(twice >= a);
  return 0;
}"#;
