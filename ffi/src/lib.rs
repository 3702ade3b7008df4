use engine::api::{CombatConfig, simulate_combat, simulate_combat_many};
use engine::status::{StatusKind, StatusMap, apply_stacks, modified_damage};
use jni::JNIEnv;
use jni::objects::{JClass, JString};
use jni::sys::{jint, jstring};
use serde_json::json;

fn ok(env: &JNIEnv, value: serde_json::Value) -> jstring {
    let payload = json!({ "ok": true, "result": value });
    env.new_string(serde_json::to_string(&payload).unwrap())
        .unwrap()
        .into_raw()
}

fn err_payload(e: impl std::fmt::Display) -> String {
    // Serialized through serde so the message is escaped; parser errors
    // routinely quote the offending input.
    serde_json::to_string(&json!({ "ok": false, "error": e.to_string() })).unwrap()
}

fn err(env: &JNIEnv, e: impl std::fmt::Display) -> jstring {
    env.new_string(err_payload(e)).unwrap().into_raw()
}

#[no_mangle]
pub extern "system" fn Java_com_echoes_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> JString<'local> {
    env.new_string("echoes-ffi 0.1.0")
        .expect("new_string failed")
}

/// Damage preview for the host UI: base damage after strength, vulnerable
/// and weak, without touching engine state. Stack counts <= 0 mean the
/// status is absent.
#[no_mangle]
pub extern "system" fn Java_com_echoes_Ffi_previewDamage(
    _env: JNIEnv<'_>,
    _class: JClass<'_>,
    base: jint,
    attacker_strength: jint,
    attacker_weak: jint,
    target_vulnerable: jint,
) -> jint {
    preview_damage_internal(base, attacker_strength, attacker_weak, target_vulnerable)
}

#[no_mangle]
pub extern "system" fn Java_com_echoes_Ffi_echoJsonLen<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    json: JString<'local>,
) -> jint {
    let s: String = env.get_string(&json).expect("get_string").into();
    s.len() as jint
}

#[no_mangle]
pub extern "system" fn Java_com_echoes_Ffi_simulateCombatJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let cfg: CombatConfig = match serde_json::from_str(&input) {
        Ok(c) => c,
        Err(e) => return err(&env, format!("invalid_config: {}", e)),
    };
    match simulate_combat(cfg) {
        Ok(report) => ok(&env, serde_json::to_value(report).unwrap()),
        Err(e) => err(&env, e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_echoes_Ffi_simulateCombatManyJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let mut root: serde_json::Value = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => return err(&env, format!("invalid_config: {}", e)),
    };
    let samples = root.get("samples").and_then(|v| v.as_u64()).unwrap_or(100) as u32;
    if let Some(obj) = root.as_object_mut() {
        obj.remove("samples");
    }
    let cfg: CombatConfig = match serde_json::from_value(root) {
        Ok(c) => c,
        Err(e) => return err(&env, format!("invalid_config: {}", e)),
    };
    match simulate_combat_many(cfg, samples) {
        Ok(stats) => ok(&env, serde_json::to_value(stats).unwrap()),
        Err(e) => err(&env, e),
    }
}

// Internal function for testing without JNI overhead
pub fn preview_damage_internal(
    base: i32,
    attacker_strength: i32,
    attacker_weak: i32,
    target_vulnerable: i32,
) -> i32 {
    let mut attacker = StatusMap::new();
    if attacker_strength > 0 {
        apply_stacks(&mut attacker, StatusKind::Strength, attacker_strength);
    }
    if attacker_weak > 0 {
        apply_stacks(&mut attacker, StatusKind::Weak, attacker_weak);
    }
    let mut target = StatusMap::new();
    if target_vulnerable > 0 {
        apply_stacks(&mut target, StatusKind::Vulnerable, target_vulnerable);
    }
    modified_damage(base.max(0), &attacker, &target)
}
