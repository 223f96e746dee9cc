//! Spanish translations for alert messages.

/// Translate an upstream session name to Spanish.
///
/// Unknown strings pass through unchanged, so new upstream session names
/// degrade to their english name instead of breaking the message.
pub fn to_spanish(text: &str) -> &str {
    match text {
        "Practice 1" => "Entrenamientos Libres 1",
        "Practice 2" => "Entrenamientos Libres 2",
        "Practice 3" => "Entrenamientos Libres 3",
        "Qualifying" => "Clasificación",
        "Sprint Qualifying" => "Clasificación Sprint",
        "Sprint Shootout" => "Clasificación Sprint",
        "Sprint" => "Carrera Sprint",
        "Race" => "Carrera",
        _ => text,
    }
}
