#[cfg(test)]
mod tests {

    mod category_tests {
        use crate::models::Category;
        use std::str::FromStr;

        #[test]
        fn test_display_round_trips_through_from_str() {
            for category in Category::ALL {
                let text = category.to_string();
                assert_eq!(Category::from_str(&text), Ok(category));
            }
        }

        #[test]
        fn test_from_str_rejects_unknown_value() {
            assert!(Category::from_str("Sculpture").is_err());
        }

        #[test]
        fn test_serde_uses_display_names() {
            let json = serde_json::to_string(&Category::AudioReactive).unwrap();
            assert_eq!(json, "\"Audio Reactive\"");
            let back: Category = serde_json::from_str("\"Digital Painting\"").unwrap();
            assert_eq!(back, Category::DigitalPainting);
        }
    }

    mod media_kind_tests {
        use crate::models::MediaKind;
        use std::str::FromStr;

        #[test]
        fn test_display_round_trips_through_from_str() {
            for kind in MediaKind::ALL {
                let text = kind.to_string();
                assert_eq!(MediaKind::from_str(&text), Ok(kind));
            }
        }

        #[test]
        fn test_gif_spelling() {
            assert_eq!(MediaKind::Gif.as_str(), "GIF");
            let json = serde_json::to_string(&MediaKind::Gif).unwrap();
            assert_eq!(json, "\"GIF\"");
        }
    }

    mod media_item_tests {
        use crate::models::{Category, MediaItem, MediaKind};
        use chrono::Utc;
        use uuid::Uuid;

        #[test]
        fn test_kind_serialises_under_type_key() {
            let item = MediaItem {
                id: Uuid::new_v4(),
                title: "Nebula".to_string(),
                file_location: "nebula.mp4".to_string(),
                hashtags: vec!["space".to_string()],
                category: Category::Generative,
                kind: MediaKind::Video,
                uploaded_by: None,
                created_at: Utc::now(),
            };
            let value = serde_json::to_value(&item).unwrap();
            assert_eq!(value["type"], "Video");
            assert!(value.get("kind").is_none());
        }
    }

    mod file_payload_tests {
        use crate::models::FilePayload;

        #[test]
        fn test_extension_comes_from_file_name() {
            let file = FilePayload::new("loop.final.MP4", vec![1]);
            assert_eq!(file.extension(), Some("MP4"));
        }

        #[test]
        fn test_extension_missing() {
            let file = FilePayload::new("README", vec![1]);
            assert_eq!(file.extension(), None);
        }

        #[test]
        fn test_content_type_guessed_from_name() {
            let file = FilePayload::new("photo.png", vec![1]);
            assert_eq!(file.content_type(), "image/png");
            let unknown = FilePayload::new("blob.xyzq", vec![1]);
            assert_eq!(unknown.content_type(), "application/octet-stream");
        }
    }

    mod tag_tests {
        use crate::services::library::split_tags;

        #[test]
        fn test_split_trims_and_lowercases() {
            assert_eq!(
                split_tags(" Neon , LIGHTS,beat "),
                vec!["neon", "lights", "beat"]
            );
        }

        #[test]
        fn test_split_drops_empty_segments() {
            assert_eq!(split_tags("a,,b,   ,c"), vec!["a", "b", "c"]);
        }

        #[test]
        fn test_split_of_blank_input_is_empty() {
            assert!(split_tags("").is_empty());
            assert!(split_tags("  ,  ,").is_empty());
        }
    }

    mod storage_key_tests {
        use crate::models::FilePayload;
        use crate::services::library::storage_key;

        #[test]
        fn test_key_keeps_extension_only() {
            let file = FilePayload::new("holiday photo.jpeg", vec![1]);
            let key = storage_key(&file);
            assert!(key.ends_with(".jpeg"));
            assert!(!key.contains("holiday"));
        }

        #[test]
        fn test_key_without_extension_is_bare() {
            let file = FilePayload::new("Makefile", vec![1]);
            let key = storage_key(&file);
            assert!(!key.contains('.'));
        }

        #[test]
        fn test_keys_never_collide() {
            let file = FilePayload::new("same.png", vec![1]);
            assert_ne!(storage_key(&file), storage_key(&file));
        }
    }

    mod password_tests {
        use crate::services::auth::{validate_password, AuthError};

        #[test]
        fn test_accepts_compliant_password() {
            assert!(validate_password("Sup3rSecret").is_ok());
        }

        #[test]
        fn test_rejects_short_password() {
            assert_eq!(validate_password("Ab1x"), Err(AuthError::WeakPassword));
        }

        #[test]
        fn test_rejects_missing_uppercase() {
            assert_eq!(validate_password("lower123x"), Err(AuthError::WeakPassword));
        }

        #[test]
        fn test_rejects_missing_lowercase() {
            assert_eq!(validate_password("UPPER123X"), Err(AuthError::WeakPassword));
        }

        #[test]
        fn test_rejects_missing_digit() {
            assert_eq!(validate_password("NoDigitsHere"), Err(AuthError::WeakPassword));
        }
    }

    mod library_message_tests {
        use crate::client::RemoteError;
        use crate::services::library::{LibraryError, Saved};

        #[test]
        fn test_validation_messages() {
            assert_eq!(
                LibraryError::NotAdmin.to_string(),
                "Only admins can add or edit media items"
            );
            assert_eq!(LibraryError::MissingTitle.to_string(), "Title is required");
            assert_eq!(LibraryError::MissingTags.to_string(), "Tags are required");
            assert_eq!(LibraryError::MissingFile.to_string(), "File is required");
        }

        #[test]
        fn test_remote_messages_carry_backend_text() {
            let error = LibraryError::Fetch(RemoteError::new("connection reset"));
            assert_eq!(
                error.to_string(),
                "Failed to fetch media items: connection reset"
            );
            let error = LibraryError::Delete(RemoteError::new("row locked"));
            assert_eq!(error.to_string(), "Failed to delete media item: row locked");
            let error = LibraryError::DeleteFile(RemoteError::new("object missing"));
            assert_eq!(error.to_string(), "Failed to delete file: object missing");
        }

        #[test]
        fn test_schema_cache_hint_is_appended() {
            let error = LibraryError::Insert(RemoteError::new(
                "Could not find the 'hashtags' column in the schema cache",
            ));
            let text = error.to_string();
            assert!(text.starts_with("Failed to save media item:"));
            assert!(text.ends_with(
                "Please ensure the 'library_items' table schema matches the expected fields."
            ));
        }

        #[test]
        fn test_schema_cache_hint_absent_for_other_errors() {
            let error = LibraryError::Update(RemoteError::new("permission denied"));
            assert_eq!(
                error.to_string(),
                "Failed to update media item: permission denied"
            );
        }

        #[test]
        fn test_saved_messages() {
            assert_eq!(Saved::Created.message(), "Media item added successfully!");
            assert_eq!(Saved::Updated.message(), "Media item updated successfully!");
        }
    }

    mod auth_message_tests {
        use crate::services::auth::AuthError;

        #[test]
        fn test_timeout_messages_are_distinct() {
            assert_eq!(
                AuthError::TimedOut.to_string(),
                "The request took too long to complete. Please try again later."
            );
            assert_eq!(
                AuthError::RemoteTimedOut.to_string(),
                "The request timed out. Please try again later."
            );
        }

        #[test]
        fn test_mismatch_message() {
            assert_eq!(
                AuthError::PasswordMismatch.to_string(),
                "Passwords do not match"
            );
        }
    }

    mod contact_validation_tests {
        use crate::models::ContactMessage;
        use crate::services::contact::{validate, ContactError};

        fn filled() -> ContactMessage {
            ContactMessage {
                full_name: "Imani Okafor".to_string(),
                company_name: "Lumen Events".to_string(),
                email: "imani@lumen.events".to_string(),
                phone: "+20 100 555 0199".to_string(),
                industry: "Events".to_string(),
                website: "https://lumen.events".to_string(),
                message: "Interested in a private showing.".to_string(),
            }
        }

        #[test]
        fn test_complete_message_passes() {
            assert!(validate(&filled()).is_empty());
        }

        #[test]
        fn test_all_failures_reported_together() {
            let message = ContactMessage::default();
            let errors = validate(&message);
            assert_eq!(
                errors,
                vec![
                    ContactError::MissingFullName,
                    ContactError::MissingCompanyName,
                    ContactError::InvalidEmail,
                ]
            );
        }

        #[test]
        fn test_email_shape_is_checked() {
            let mut message = filled();
            message.email = "not-an-email".to_string();
            assert_eq!(validate(&message), vec![ContactError::InvalidEmail]);
            message.email = "still@incomplete".to_string();
            assert_eq!(validate(&message), vec![ContactError::InvalidEmail]);
        }

        #[test]
        fn test_whitespace_only_names_fail() {
            let mut message = filled();
            message.full_name = "   ".to_string();
            assert_eq!(validate(&message), vec![ContactError::MissingFullName]);
        }
    }

    mod profile_model_tests {
        use crate::models::Profile;
        use chrono::Utc;
        use uuid::Uuid;

        fn profile(first: Option<&str>, last: Option<&str>) -> Profile {
            Profile {
                id: Uuid::new_v4(),
                email: "guest@example.com".to_string(),
                first_name: first.map(str::to_string),
                last_name: last.map(str::to_string),
                date_of_birth: None,
                address: None,
                avatar_url: None,
                is_admin: false,
                created_at: Utc::now(),
            }
        }

        #[test]
        fn test_complete_needs_both_names() {
            assert!(profile(Some("Nadia"), Some("Hassan")).is_complete());
            assert!(!profile(Some("Nadia"), None).is_complete());
            assert!(!profile(None, Some("Hassan")).is_complete());
        }

        #[test]
        fn test_blank_names_do_not_count() {
            assert!(!profile(Some(""), Some("Hassan")).is_complete());
            assert!(!profile(Some("Nadia"), Some("  ")).is_complete());
        }
    }

    mod client_tests {
        use crate::client::{MemoryBackend, ObjectStore};

        #[test]
        fn test_public_url_shape() {
            let backend = MemoryBackend::default();
            assert_eq!(
                backend.public_url("media", "clip.mp4"),
                "https://example.supabase.co/storage/v1/object/public/media/clip.mp4"
            );
        }
    }

    mod config_tests {
        use crate::config::Config;

        #[test]
        fn test_minimal_config_gets_defaults() {
            let config: Config = toml::from_str(
                r#"
                [backend]
                url = "https://demo.example.co"
                anon_key = "public-anon-key"
                "#,
            )
            .unwrap();
            config.validate().unwrap();
            assert_eq!(config.storage.media_bucket, "media");
            assert_eq!(config.storage.avatar_bucket, "avatars");
            assert_eq!(config.auth.reset_timeout_secs, 10);
            assert_eq!(
                config.auth.reset_timeout(),
                std::time::Duration::from_secs(10)
            );
        }

        #[test]
        fn test_invalid_backend_url_rejected() {
            let config: Config = toml::from_str(
                r#"
                [backend]
                url = "not a url"
                anon_key = "public-anon-key"
                "#,
            )
            .unwrap();
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_blank_anon_key_rejected() {
            let config: Config = toml::from_str(
                r#"
                [backend]
                url = "https://demo.example.co"
                anon_key = "  "
                "#,
            )
            .unwrap();
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_zero_reset_timeout_rejected() {
            let config: Config = toml::from_str(
                r#"
                [backend]
                url = "https://demo.example.co"
                anon_key = "public-anon-key"

                [auth]
                reset_timeout_secs = 0
                "#,
            )
            .unwrap();
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_overridden_buckets_survive() {
            let config: Config = toml::from_str(
                r#"
                [backend]
                url = "https://demo.example.co"
                anon_key = "public-anon-key"

                [storage]
                media_bucket = "gallery"
                avatar_bucket = "faces"
                "#,
            )
            .unwrap();
            config.validate().unwrap();
            assert_eq!(config.storage.media_bucket, "gallery");
            assert_eq!(config.storage.avatar_bucket, "faces");
        }

        #[test]
        fn test_load_reads_and_validates_a_file() {
            let path = std::env::temp_dir()
                .join(format!("wowzone-config-{}.toml", uuid::Uuid::new_v4()));
            std::fs::write(
                &path,
                "[backend]\nurl = \"https://demo.example.co\"\nanon_key = \"public-anon-key\"\n",
            )
            .unwrap();
            let config = Config::load(&path).unwrap();
            assert_eq!(config.backend.url, "https://demo.example.co");
            std::fs::remove_file(&path).unwrap();

            assert!(Config::load(std::path::Path::new("/nonexistent/wowzone.toml")).is_err());
        }

        // Both variables live in one test so parallel test threads never
        // race on the process environment.
        #[test]
        fn test_env_bootstrap_requires_both_variables() {
            std::env::set_var("WOWZONE_BACKEND_URL", "https://demo.example.co");
            std::env::set_var("WOWZONE_BACKEND_ANON_KEY", "public-anon-key");
            let config = Config::from_env().unwrap();
            assert_eq!(config.backend.url, "https://demo.example.co");
            assert_eq!(config.storage.media_bucket, "media");

            std::env::remove_var("WOWZONE_BACKEND_ANON_KEY");
            assert!(Config::from_env().is_err());
            std::env::remove_var("WOWZONE_BACKEND_URL");
        }
    }

    mod newsletter_message_tests {
        use crate::services::newsletter::NewsletterError;

        #[test]
        fn test_security_policy_message() {
            assert_eq!(
                NewsletterError::SecurityPolicy.to_string(),
                "It seems our security settings need a tweak. Please contact support."
            );
        }
    }
}
