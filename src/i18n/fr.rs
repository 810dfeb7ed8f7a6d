//! French translations / Traductions fran\u{00E7}aises

use std::collections::HashMap;

pub fn get_translations() -> HashMap<String, String> {
    let mut t = HashMap::new();

    // Carbon observations
    t.insert("carbon.observation.high".into(), "\u{00C9}missions mensuelles \u{00E9}lev\u{00E9}es : {tonnes} tonnes de CO2".into());
    t.insert("carbon.observation.moderate".into(), "\u{00C9}missions mensuelles mod\u{00E9}r\u{00E9}es : {tonnes} tonnes de CO2".into());
    t.insert("carbon.observation.low".into(), "\u{00C9}missions mensuelles faibles : {tonnes} tonnes de CO2".into());
    t.insert("carbon.observation.daily_average".into(), "\u{00C9}missions journali\u{00E8}res moyennes : {kg} kg de CO2".into());

    // Carbon recommendations
    t.insert("carbon.recommendation.efficiency".into(), "Envisager des am\u{00E9}liorations d'efficacit\u{00E9} \u{00E9}nerg\u{00E9}tique (\u{00E9}clairage LED, optimisation CVC)".into());
    t.insert("carbon.recommendation.renewables".into(), "\u{00C9}tudier les \u{00E9}nergies renouvelables (solaire, \u{00E9}olien)".into());
    t.insert("carbon.recommendation.demand".into(), "Mettre en place un pilotage de la demande pour r\u{00E9}duire les pointes".into());
    t.insert("carbon.recommendation.monitor".into(), "Suivre les tendances de consommation pour rep\u{00E9}rer les anomalies".into());

    // Carbon warnings
    t.insert("carbon.warning.unknown_region".into(), "R\u{00E9}gion inconnue '{region}', facteur d'\u{00E9}mission par d\u{00E9}faut {factor} kg CO2/kWh utilis\u{00E9}".into());

    // Carbon formulas
    t.insert("carbon.formula.daily".into(), "\u{00C9}nergie (kWh) \u{00D7} Facteur d'\u{00E9}mission (kg CO2/kWh)".into());
    t.insert("carbon.formula.monthly".into(), "Somme des \u{00E9}missions journali\u{00E8}res de CO2".into());
    t.insert("carbon.formula.tonnes".into(), "CO2 mensuel / 1000".into());

    // Model explanation
    t.insert("explain.title".into(), "FONCTIONNEMENT DU MOD\u{00C8}LE".into());
    t.insert("explain.formula".into(), "\u{00C9}nergie (kWh) = Base + (Heure \u{00D7} {hour}) + (Jour de la semaine \u{00D7} {day_of_week}) + ...".into());
    t.insert("explain.interpretation".into(), "Interpr\u{00E9}tation :".into());
    t.insert("explain.increases".into(), "augmente".into());
    t.insert("explain.decreases".into(), "diminue".into());
    t.insert("explain.feature_effect".into(), "\u{2022} {feature} : chaque unit\u{00E9} {direction} l'\u{00E9}nergie de {impact} kWh".into());
    t.insert("explain.base".into(), "\u{2022} \u{00C9}nergie de base (ordonn\u{00E9}e \u{00E0} l'origine) : {intercept} kWh".into());
    t.insert("explain.base_note".into(), "  (\u{00C9}nergie consomm\u{00E9}e ind\u{00E9}pendamment de l'heure)".into());
    t.insert("explain.example_title".into(), "EXEMPLE DE PR\u{00C9}DICTION".into());
    t.insert("explain.time".into(), "Heure : {time}".into());
    t.insert("explain.predicted".into(), "\u{00C9}nergie pr\u{00E9}dite : {energy} kWh".into());
    t.insert("explain.calculated_as".into(), "Calcul :".into());
    t.insert("explain.base_line".into(), "  Base : {intercept} kWh".into());
    t.insert("explain.contribution".into(), "  + {feature} ({value}) \u{00D7} {coefficient} = {contribution} kWh".into());
    t.insert("explain.clamped".into(), "  = {raw} kWh, ramen\u{00E9} \u{00E0} 0 kWh (la consommation ne peut pas \u{00EA}tre n\u{00E9}gative)".into());

    t
}
