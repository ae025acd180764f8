use std::collections::HashSet;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
#[allow(dead_code)]
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// CSV extract of the parish table used by integration tests.
///
/// Column names match the `parroquias` table; blank cells are missing values.
#[allow(dead_code)]
pub const PARISH_CSV: &str = "\
nombre_parroquia,nombre_canton,nombre_provincia,num_infraestructura_petrolera,num_pozos,num_sitios_contaminados,establecimientos_por_10k_hab,pct_poblacion_afro,poblacion_total
Dureno,Lago Agrio,Sucumbios,12,8,4,2.5,1.2,4500
Pacayacu,Lago Agrio,Sucumbios,30,22,15,1.1,3.4,8000
Limoncocha,Shushufindi,Sucumbios,0,0,0,6.0,0.5,2200
Borbon,Eloy Alfaro,Esmeraldas,0,,,0,60.0,5300
Tachina,Esmeraldas,Esmeraldas,1,0,1,3.5,45.0,
Dayuma,Orellana,Orellana,18,14,9,,2.0,6200
";

/// Write [`PARISH_CSV`] to a temporary file.
#[allow(dead_code)]
pub fn parish_csv_file() -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("create temp csv");
    file.write_all(PARISH_CSV.as_bytes()).expect("write temp csv");
    file
}

/// Local repository seeded with [`PARISH_CSV`].
#[allow(dead_code)]
pub fn seeded_repository() -> paradox_dashboard::db::LocalRepository {
    let file = parish_csv_file();
    paradox_dashboard::db::LocalRepository::from_csv_path(file.path()).expect("load seed csv")
}
