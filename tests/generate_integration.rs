//! Integration test for the full generate-and-save workflow.
//!
//! Drives a JSON type model through the CLI entry point and verifies the
//! written `enums.ts` / `dto.ts` / `api.ts` files.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use tempfile::TempDir;

use tsclientgen::run_cli;

/// A small model: one controller action returning a list of DTOs, with an
/// enum-typed query parameter.
fn sample_model_json() -> String {
    serde_json::json!([
        { "name": "void", "kind": "Struct", "wellKnown": "Void" },
        { "name": "string", "kind": "Class", "wellKnown": "String" },
        { "name": "int", "kind": "Struct", "wellKnown": "Number" },
        {
            "name": "UserType",
            "kind": "Enum",
            "variants": [
                { "name": "Regular", "value": 0 },
                { "name": "Admin", "value": 1 }
            ]
        },
        {
            "name": "UserDto",
            "kind": "Class",
            "members": [
                { "name": "Name", "ty": 1 },
                { "name": "Age", "ty": 2 },
                { "name": "UserType", "ty": 3 }
            ]
        },
        {
            "name": "List",
            "kind": "Class",
            "wellKnown": "Sequence",
            "genericArgs": [4]
        },
        {
            "name": "Task",
            "kind": "Class",
            "wellKnown": "Task",
            "genericArgs": [5]
        },
        {
            "name": "SampleController",
            "kind": "Class",
            "attributes": [
                { "name": "ApiController" },
                { "name": "Route", "value": "[controller]/[action]" }
            ],
            "methods": [
                {
                    "name": "GetRegisteredUsers",
                    "returnTy": 6,
                    "params": [{ "name": "userType", "ty": 3 }]
                }
            ]
        }
    ])
    .to_string()
}

#[test]
fn test_generate_writes_all_three_modules() {
    let work_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = work_dir.path().join("model.json");
    let out_dir = work_dir.path().join("client");
    fs::write(&model_path, sample_model_json()).unwrap();

    let code = run_cli(vec![
        "tsclientgen".to_string(),
        "generate".to_string(),
        "--model".to_string(),
        model_path.to_str().unwrap().to_string(),
        "--out".to_string(),
        out_dir.to_str().unwrap().to_string(),
        "--force-create".to_string(),
    ]);
    assert_eq!(code, 0);

    let enums = fs::read_to_string(out_dir.join("enums.ts")).unwrap();
    assert!(enums.contains("export enum UserType {"));
    assert!(enums.contains("  Regular = 0,"));
    assert!(enums.contains("case UserType.Admin: return 'Admin';"));
    assert!(enums.contains("return [UserType.Regular, UserType.Admin];"));

    let dto = fs::read_to_string(out_dir.join("dto.ts")).unwrap();
    assert!(dto.contains("import * as enums from './enums';"));
    assert!(dto.contains("export interface UserDto {"));
    assert!(dto.contains("  name: string | null;"));
    assert!(dto.contains("  age: number;"));
    assert!(dto.contains("  userType: enums.UserType;"));

    let api = fs::read_to_string(out_dir.join("api.ts")).unwrap();
    assert!(api.contains("import * as dto from './dto';"));
    assert!(api.contains("import * as enums from './enums';"));
    assert!(api.contains("export namespace SampleController {"));
    assert!(api.contains(
        "export async function getRegisteredUsers(userType: enums.UserType): Promise<dto.UserDto[]> {"
    ));
    assert!(api.contains("url: '/Sample/GetRegisteredUsers',"));
    assert!(api.contains("method: 'GET',"));
    assert!(api.contains("params: { userType },"));
    assert!(api.contains("data: null,"));
}

#[test]
fn test_generate_with_options_file() {
    let work_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = work_dir.path().join("model.json");
    let options_path = work_dir.path().join("options.json");
    let out_dir = work_dir.path().join("client");
    fs::write(&model_path, sample_model_json()).unwrap();
    fs::write(
        &options_path,
        serde_json::json!({
            "header": "// produced by the build pipeline",
            "propertyNullableMapping": "NullOrUndefined",
            "makeUndefinedPropertiesOptional": true,
            "additionalModuleImports": {
                "api": ["import { request } from './transport';"]
            }
        })
        .to_string(),
    )
    .unwrap();

    let code = run_cli(vec![
        "tsclientgen".to_string(),
        "generate".to_string(),
        "--model".to_string(),
        model_path.to_str().unwrap().to_string(),
        "--out".to_string(),
        out_dir.to_str().unwrap().to_string(),
        "--options".to_string(),
        options_path.to_str().unwrap().to_string(),
        "--force-create".to_string(),
    ]);
    assert_eq!(code, 0);

    let dto = fs::read_to_string(out_dir.join("dto.ts")).unwrap();
    assert!(dto.starts_with("// produced by the build pipeline\n"));
    assert!(dto.contains("  name?: string | null;"));

    let api = fs::read_to_string(out_dir.join("api.ts")).unwrap();
    assert!(api.contains("import { request } from './transport';"));
}

#[test]
fn test_missing_output_directory_fails_without_force_create() {
    let work_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = work_dir.path().join("model.json");
    let out_dir = work_dir.path().join("does-not-exist");
    fs::write(&model_path, sample_model_json()).unwrap();

    let code = run_cli(vec![
        "tsclientgen".to_string(),
        "generate".to_string(),
        "--model".to_string(),
        model_path.to_str().unwrap().to_string(),
        "--out".to_string(),
        out_dir.to_str().unwrap().to_string(),
    ]);
    assert_ne!(code, 0);
    assert!(!out_dir.exists());
}

#[test]
fn test_invalid_model_reports_parse_error() {
    let work_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = work_dir.path().join("model.json");
    fs::write(&model_path, "{ not json").unwrap();

    let code = run_cli(vec![
        "tsclientgen".to_string(),
        "generate".to_string(),
        "--model".to_string(),
        model_path.to_str().unwrap().to_string(),
        "--out".to_string(),
        work_dir.path().to_str().unwrap().to_string(),
    ]);
    assert_ne!(code, 0);
}
