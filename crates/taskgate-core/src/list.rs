//! Diferencia de conjuntos sobre secuencias ordenadas de nombres.

use std::collections::HashSet;

/// Devuelve cada nombre de `left` que no aparece en `right`, en el orden de
/// `left`. Los duplicados de `left` se reportan una vez por ocurrencia (no se
/// deduplica). La igualdad es exacta, sensible a mayúsculas.
pub fn diff_left<L, R>(left: &[L], right: &[R]) -> Vec<String>
    where L: AsRef<str>,
          R: AsRef<str>
{
    let present: HashSet<&str> = right.iter().map(|r| r.as_ref()).collect();
    left.iter()
        .map(|l| l.as_ref())
        .filter(|l| !present.contains(l))
        .map(str::to_string)
        .collect()
}
