//! Template catalog data
//!
//! One row per supported type tag. Rows are turned into [`TemplateDescriptor`]s
//! by the registry; nothing here is consulted at conversion time directly.
//!
//! [`TemplateDescriptor`]: super::TemplateDescriptor

use super::{Category, Direction, ElementKind, EventDefinition, FlattenRule, rule};

pub(super) struct StepEntry {
    pub tag: &'static str,
    pub category: Category,
    pub element: ElementKind,
    pub event: Option<EventDefinition>,
    pub cname: &'static str,
    pub version: &'static str,
    pub activity_type: &'static str,
    pub flattening: &'static [FlattenRule],
}

pub(super) struct AdapterEntry {
    pub tag: &'static str,
    pub cname: &'static str,
    pub transport: &'static str,
    pub protocol: &'static str,
    pub direction: Direction,
    pub version: &'static str,
    pub flattening: &'static [FlattenRule],
}

// Flattening tables, shared between types with the same nested config shape.

const NO_RULES: &[FlattenRule] = &[];

const HTTP_RULES: &[FlattenRule] = &[
    rule("authentication.type", "authenticationMethod"),
    rule("authentication.credentialName", "credentialName"),
    rule("authentication.privateKeyAlias", "privateKeyAlias"),
    rule("proxy.type", "proxyType"),
    rule("proxy.host", "proxyHost"),
    rule("proxy.port", "proxyPort"),
    rule("proxy.locationId", "locationID"),
];

const FILE_TRANSFER_RULES: &[FlattenRule] = &[
    rule("authentication.type", "authentication"),
    rule("authentication.credentialName", "credential_name"),
    rule("authentication.privateKeyAlias", "privateKeyAlias"),
    rule("connection.host", "host"),
    rule("connection.timeout", "connectTimeout"),
    rule("connection.maxReconnectAttempts", "maximumReconnectAttempts"),
    rule("proxy.type", "proxyType"),
    rule("proxy.locationId", "locationID"),
];

const MAIL_RULES: &[FlattenRule] = &[
    rule("authentication.type", "auth"),
    rule("authentication.credentialName", "user"),
    rule("connection.host", "address"),
    rule("connection.protection", "ssl"),
    rule("connection.timeout", "timeout"),
];

const MESSAGING_RULES: &[FlattenRule] = &[
    rule("retry.interval", "retryInterval"),
    rule("retry.maxAttempts", "maximumRetries"),
    rule("retry.exponentialBackoff", "exponentialBackoff"),
    rule("retry.maxInterval", "maximumRetryInterval"),
    rule("authentication.type", "authenticationType"),
    rule("authentication.credentialName", "credentialName"),
];

const SPLITTER_RULES: &[FlattenRule] = &[
    rule("grouping.size", "grouping"),
    rule("grouping.stopOnException", "stopOnException"),
    rule("streaming.enabled", "Streaming"),
    rule("parallel.enabled", "ParallelProcessing"),
    rule("parallel.threads", "NumberofConcurrentProcess"),
    rule("parallel.timeout", "timeout"),
];

const AGGREGATOR_RULES: &[FlattenRule] = &[
    rule("correlation.expression", "correlationExpression"),
    rule("completion.condition", "completionCondition"),
    rule("completion.timeout", "completionTimeout"),
    rule("aggregation.algorithm", "aggregationAlgorithm"),
    rule("aggregation.dataStoreName", "dataStoreName"),
];

const DATA_STORE_RULES: &[FlattenRule] = &[
    rule("storage.name", "storageName"),
    rule("storage.visibility", "visibility"),
    rule("retention.days", "expirationPeriod"),
    rule("retention.alertDays", "alert"),
];

const CONTENT_MODIFIER_RULES: &[FlattenRule] = &[
    rule("body.type", "bodyType"),
    rule("body.content", "wrapContent"),
];

const CRYPTO_RULES: &[FlattenRule] = &[
    rule("signature.algorithm", "signatureAlgorithm"),
    rule("signature.keyAlias", "signerKeyAlias"),
    rule("encryption.algorithm", "algorithm"),
    rule("encryption.keyLength", "keyLength"),
    rule("keys.alias", "receiverPublicKeyAlias"),
];

const JSON_XML_RULES: &[FlattenRule] = &[
    rule("namespace.prefix", "jsonNamespacePrefix"),
    rule("namespace.uri", "jsonNamespaceURI"),
    rule("root.name", "additionalRootElementName"),
    rule("root.namespace", "additionalRootElementNamespace"),
];

const TIMER_RULES: &[FlattenRule] = &[
    rule("schedule.type", "scheduleKey"),
    rule("schedule.expression", "cronExpression"),
    rule("schedule.timeZone", "timeZone"),
];

const PROCESS_CALL_RULES: &[FlattenRule] = &[
    rule("loop.condition", "conditionExpression"),
    rule("loop.maxIterations", "maxNumberOfLoops"),
];

const fn step(
    tag: &'static str,
    category: Category,
    element: ElementKind,
    cname: &'static str,
    version: &'static str,
    activity_type: &'static str,
    flattening: &'static [FlattenRule],
) -> StepEntry {
    StepEntry {
        tag,
        category,
        element,
        event: None,
        cname,
        version,
        activity_type,
        flattening,
    }
}

const fn event(
    tag: &'static str,
    element: ElementKind,
    definition: EventDefinition,
    cname: &'static str,
    version: &'static str,
    activity_type: &'static str,
    flattening: &'static [FlattenRule],
) -> StepEntry {
    StepEntry {
        tag,
        category: Category::Event,
        element,
        event: Some(definition),
        cname,
        version,
        activity_type,
        flattening,
    }
}

const fn adapter(
    tag: &'static str,
    cname: &'static str,
    transport: &'static str,
    protocol: &'static str,
    direction: Direction,
    version: &'static str,
    flattening: &'static [FlattenRule],
) -> AdapterEntry {
    AdapterEntry {
        tag,
        cname,
        transport,
        protocol,
        direction,
        version,
        flattening,
    }
}

use Category::{
    ExternalCall, Persistence, Process, Routing, ScriptFilter, Security, Transformation,
};
use Direction::{Receiver, Sender};
use ElementKind::{
    CallActivity, EndEvent, ExclusiveGateway, IntermediateCatchEvent, ParallelGateway,
    ServiceTask, StartEvent, SubProcess,
};

#[rustfmt::skip]
pub(super) const STEPS: &[StepEntry] = &[
    // process / container
    step("local_integration_process", Process, SubProcess, "LocalIntegrationProcess", "1.1.3", "LocalIntegrationProcess", NO_RULES),
    step("exception_subprocess", Process, SubProcess, "ErrorEventSubProcessTemplate", "1.1.0", "ErrorEventSubProcessTemplate", NO_RULES),
    step("process_call", Process, CallActivity, "NonLoopingProcess", "1.0.3", "ProcessCallElement", NO_RULES),
    step("looping_process_call", Process, CallActivity, "LoopingProcess", "1.0.2", "ProcessCallElement", PROCESS_CALL_RULES),
    step("idempotent_process_call", Process, CallActivity, "IdempotentProcessCall", "1.0.1", "IdempotentProcessCall", DATA_STORE_RULES),
    // events
    event("start_event", StartEvent, EventDefinition::Message, "MessageStartEvent", "1.0", "StartEvent", NO_RULES),
    event("end_event", EndEvent, EventDefinition::Message, "MessageEndEvent", "1.1", "EndEvent", NO_RULES),
    event("timer_start_event", StartEvent, EventDefinition::Timer, "intermediatetimer", "1.3", "StartTimerEvent", TIMER_RULES),
    event("error_start_event", StartEvent, EventDefinition::Error, "ErrorStartEvent", "1.0", "StartErrorEvent", NO_RULES),
    event("error_end_event", EndEvent, EventDefinition::Error, "ErrorEndEvent", "1.1", "EndErrorEvent", NO_RULES),
    event("escalation_end_event", EndEvent, EventDefinition::Escalation, "EscalationEndEvent", "1.0", "EscalationEndEvent", NO_RULES),
    event("terminate_end_event", EndEvent, EventDefinition::Terminate, "TerminateEndEvent", "1.0", "TerminateEndEvent", NO_RULES),
    event("timer_intermediate_event", IntermediateCatchEvent, EventDefinition::Timer, "IntermediateTimerEvent", "1.0", "IntermediateTimer", TIMER_RULES),
    // routing
    step("router", Routing, ExclusiveGateway, "ExclusiveGateway", "1.1.2", "ExclusiveGateway", NO_RULES),
    step("parallel_multicast", Routing, ParallelGateway, "ParallelMulticast", "1.1.0", "Multicast", NO_RULES),
    step("sequential_multicast", Routing, ParallelGateway, "SequentialMulticast", "1.1.0", "Multicast", NO_RULES),
    step("join", Routing, ParallelGateway, "Join", "1.0.0", "Join", NO_RULES),
    step("gather", Routing, CallActivity, "Gather", "1.2.0", "Gather", NO_RULES),
    step("aggregator", Routing, CallActivity, "Aggregator", "1.1.1", "Aggregator", AGGREGATOR_RULES),
    step("general_splitter", Routing, CallActivity, "GeneralSplitter", "1.6.0", "Splitter", SPLITTER_RULES),
    step("iterating_splitter", Routing, CallActivity, "IteratingSplitter", "1.6.0", "Splitter", SPLITTER_RULES),
    step("edi_splitter", Routing, CallActivity, "EDISplitter", "1.8.0", "Splitter", SPLITTER_RULES),
    step("idoc_splitter", Routing, CallActivity, "IDocSplitter", "1.0.0", "Splitter", SPLITTER_RULES),
    step("zip_splitter", Routing, CallActivity, "ZipSplitter", "1.0.0", "Splitter", SPLITTER_RULES),
    step("tar_splitter", Routing, CallActivity, "TarSplitter", "1.0.0", "Splitter", SPLITTER_RULES),
    // transformation
    step("content_modifier", Transformation, CallActivity, "Enricher", "1.6.0", "Enricher", CONTENT_MODIFIER_RULES),
    step("message_mapping", Transformation, CallActivity, "MessageMapping", "1.3.1", "Mapping", NO_RULES),
    step("xslt_mapping", Transformation, CallActivity, "XSLTMapping", "1.2.0", "Mapping", NO_RULES),
    step("operation_mapping", Transformation, CallActivity, "OperationMapping", "1.0.0", "Mapping", NO_RULES),
    step("id_mapping", Transformation, CallActivity, "IDMapper", "1.0.0", "Mapping", NO_RULES),
    step("json_to_xml_converter", Transformation, CallActivity, "JsonToXmlConverter", "1.1.2", "JsonToXmlConverter", JSON_XML_RULES),
    step("xml_to_json_converter", Transformation, CallActivity, "XmlToJsonConverter", "1.0.8", "XmlToJsonConverter", JSON_XML_RULES),
    step("csv_to_xml_converter", Transformation, CallActivity, "CsvToXmlConverter", "1.3.0", "CsvToXmlConverter", NO_RULES),
    step("xml_to_csv_converter", Transformation, CallActivity, "XmlToCsvConverter", "1.4.0", "XmlToCsvConverter", NO_RULES),
    step("edi_to_xml_converter", Transformation, CallActivity, "EDItoXMLConverter", "1.0.0", "EDItoXMLConverter", NO_RULES),
    step("xml_to_edi_converter", Transformation, CallActivity, "XMLtoEDIConverter", "1.0.0", "XMLtoEDIConverter", NO_RULES),
    step("base64_encoder", Transformation, CallActivity, "Base64Encoder", "1.0.0", "Encoder", NO_RULES),
    step("base64_decoder", Transformation, CallActivity, "Base64Decoder", "1.0.0", "Decoder", NO_RULES),
    step("zip_compression", Transformation, CallActivity, "ZipEncoder", "1.0", "Encoder", NO_RULES),
    step("zip_decompression", Transformation, CallActivity, "ZipDecoder", "1.0", "Decoder", NO_RULES),
    step("gzip_compression", Transformation, CallActivity, "GZIPEncoder", "1.0", "Encoder", NO_RULES),
    step("gzip_decompression", Transformation, CallActivity, "GZIPDecoder", "1.0", "Decoder", NO_RULES),
    step("mime_multipart_encoder", Transformation, CallActivity, "MIMEMultipartEncoder", "1.1", "Encoder", NO_RULES),
    step("mime_multipart_decoder", Transformation, CallActivity, "MIMEMultipartDecoder", "1.0", "Decoder", NO_RULES),
    step("message_digest", Transformation, CallActivity, "MessageDigest", "1.0.0", "MessageDigest", NO_RULES),
    step("xml_modifier", Transformation, CallActivity, "XmlModifier", "1.0.0", "XmlModifier", NO_RULES),
    step("edi_extractor", Transformation, CallActivity, "EDIExtractor", "1.0.0", "EDIExtractor", NO_RULES),
    // security
    step("pgp_encryptor", Security, CallActivity, "PGPEncryptor", "1.2", "Encryptor", CRYPTO_RULES),
    step("pgp_decryptor", Security, CallActivity, "PGPDecryptor", "1.1", "Decryptor", CRYPTO_RULES),
    step("pkcs7_encryptor", Security, CallActivity, "PKCS7Encryptor", "1.3", "Encryptor", CRYPTO_RULES),
    step("pkcs7_decryptor", Security, CallActivity, "PKCS7Decryptor", "1.0", "Decryptor", CRYPTO_RULES),
    step("pkcs7_signer", Security, CallActivity, "PKCS7Signer", "1.4", "Signer", CRYPTO_RULES),
    step("pkcs7_verifier", Security, CallActivity, "PKCS7Verifier", "1.2", "Verifier", CRYPTO_RULES),
    step("xml_signer", Security, CallActivity, "XMLDigitalSigner", "1.3", "Signer", CRYPTO_RULES),
    step("xml_verifier", Security, CallActivity, "XMLDigitalSignVerifier", "1.0", "Verifier", CRYPTO_RULES),
    step("simple_signer", Security, CallActivity, "SimpleSigner", "1.0", "Signer", CRYPTO_RULES),
    step("wss_producer", Security, CallActivity, "WSSecurityProducer", "1.0", "WSSecurityProducer", CRYPTO_RULES),
    step("wss_consumer", Security, CallActivity, "WSSecurityConsumer", "1.0", "WSSecurityConsumer", CRYPTO_RULES),
    step("xml_encryptor", Security, CallActivity, "XMLEncryptor", "1.0", "Encryptor", CRYPTO_RULES),
    // script / filter
    step("groovy_script", ScriptFilter, CallActivity, "GroovyScript", "1.1.2", "Script", NO_RULES),
    step("javascript", ScriptFilter, CallActivity, "JavaScript", "1.0.1", "Script", NO_RULES),
    step("filter", ScriptFilter, CallActivity, "Filter", "1.1.0", "Filter", NO_RULES),
    step("xml_validator", ScriptFilter, CallActivity, "XmlValidator", "2.2.0", "XmlValidator", NO_RULES),
    step("edi_validator", ScriptFilter, CallActivity, "EDIValidator", "1.0.0", "EDIValidator", NO_RULES),
    step("write_variables", ScriptFilter, CallActivity, "WriteVariables", "1.2.0", "Variables", NO_RULES),
    // persistence
    step("persist", Persistence, CallActivity, "Persist", "1.0.0", "Persist", NO_RULES),
    step("data_store_write", Persistence, CallActivity, "DataStoreWrite", "1.6.0", "DBstorage", DATA_STORE_RULES),
    step("data_store_get", Persistence, CallActivity, "DataStoreGet", "1.2.0", "DBstorage", DATA_STORE_RULES),
    step("data_store_select", Persistence, CallActivity, "DataStoreSelect", "1.5.0", "DBstorage", DATA_STORE_RULES),
    step("data_store_delete", Persistence, CallActivity, "DataStoreDelete", "1.0.0", "DBstorage", DATA_STORE_RULES),
    // external calls
    step("request_reply", ExternalCall, ServiceTask, "ExternalCall", "1.0.4", "ExternalCall", NO_RULES),
    step("send", ExternalCall, ServiceTask, "Send", "1.0.2", "ExternalCall", NO_RULES),
    step("content_enricher", ExternalCall, ServiceTask, "ContentEnricher", "1.5.0", "contentEnricherWithLookup", NO_RULES),
    step("poll_enrich", ExternalCall, ServiceTask, "PollEnrich", "1.0.0", "ExternalCall", NO_RULES),
];

#[rustfmt::skip]
pub(super) const ADAPTERS: &[AdapterEntry] = &[
    adapter("http_sender", "sap:HTTPS", "HTTPS", "None", Sender, "1.5.0", HTTP_RULES),
    adapter("http_receiver", "sap:HTTP", "HTTP", "None", Receiver, "1.16.0", HTTP_RULES),
    adapter("soap_sender", "sap:SOAP", "HTTP", "SOAP 1.x", Sender, "1.8.0", HTTP_RULES),
    adapter("soap_receiver", "sap:SOAP", "HTTP", "SOAP 1.x", Receiver, "1.11.0", HTTP_RULES),
    adapter("soap_rm_sender", "sap:SOAP", "HTTP", "SOAP RM", Sender, "1.4.0", HTTP_RULES),
    adapter("soap_rm_receiver", "sap:SOAP", "HTTP", "SOAP RM", Receiver, "1.6.0", HTTP_RULES),
    adapter("xi_sender", "sap:XI", "HTTP", "XI", Sender, "1.3.0", HTTP_RULES),
    adapter("xi_receiver", "sap:XI", "HTTP", "XI", Receiver, "1.4.0", HTTP_RULES),
    adapter("idoc_sender", "sap:IDOC", "HTTP", "IDOC", Sender, "1.4.0", HTTP_RULES),
    adapter("idoc_receiver", "sap:IDOC", "HTTP", "IDOC", Receiver, "1.5.0", HTTP_RULES),
    adapter("rfc_receiver", "sap:RFC", "RFC", "RFC", Receiver, "1.6.0", NO_RULES),
    adapter("odata_v2_sender", "sap:HCIOData", "HTTP", "OData V2", Sender, "1.3.0", HTTP_RULES),
    adapter("odata_v2_receiver", "sap:HCIOData", "HTTP", "OData V2", Receiver, "1.22.0", HTTP_RULES),
    adapter("odata_v4_receiver", "sap:HCIOData", "HTTP", "OData V4", Receiver, "1.10.0", HTTP_RULES),
    adapter("sftp_sender", "sap:SFTP", "SFTP", "File", Sender, "1.11.0", FILE_TRANSFER_RULES),
    adapter("sftp_receiver", "sap:SFTP", "SFTP", "File", Receiver, "1.12.0", FILE_TRANSFER_RULES),
    adapter("ftp_sender", "sap:FTP", "FTP", "File", Sender, "1.3.0", FILE_TRANSFER_RULES),
    adapter("ftp_receiver", "sap:FTP", "FTP", "File", Receiver, "1.3.0", FILE_TRANSFER_RULES),
    adapter("mail_sender", "sap:Mail", "IMAP", "None", Sender, "1.6.0", MAIL_RULES),
    adapter("mail_receiver", "sap:Mail", "SMTP", "None", Receiver, "1.9.0", MAIL_RULES),
    adapter("as2_sender", "sap:AS2", "HTTP", "AS2", Sender, "1.7.0", HTTP_RULES),
    adapter("as2_receiver", "sap:AS2", "HTTP", "AS2", Receiver, "1.7.0", HTTP_RULES),
    adapter("as4_sender", "sap:AS4", "HTTP", "ebMS3", Sender, "1.3.0", HTTP_RULES),
    adapter("as4_receiver", "sap:AS4", "HTTP", "ebMS3", Receiver, "1.4.0", HTTP_RULES),
    adapter("jms_sender", "sap:JMS", "JMS", "None", Sender, "1.5.0", MESSAGING_RULES),
    adapter("jms_receiver", "sap:JMS", "JMS", "None", Receiver, "1.5.0", MESSAGING_RULES),
    adapter("amqp_sender", "sap:AMQP", "TCP", "AMQP 1.0", Sender, "1.3.0", MESSAGING_RULES),
    adapter("amqp_receiver", "sap:AMQP", "TCP", "AMQP 1.0", Receiver, "1.3.0", MESSAGING_RULES),
    adapter("kafka_sender", "sap:Kafka", "TCP", "Kafka", Sender, "1.1.0", MESSAGING_RULES),
    adapter("kafka_receiver", "sap:Kafka", "TCP", "Kafka", Receiver, "1.1.0", MESSAGING_RULES),
    adapter("process_direct_sender", "sap:ProcessDirect", "Not Applicable", "Not Applicable", Sender, "1.1.0", NO_RULES),
    adapter("process_direct_receiver", "sap:ProcessDirect", "Not Applicable", "Not Applicable", Receiver, "1.1.0", NO_RULES),
    adapter("successfactors_sender", "sap:SuccessFactors", "HTTPS", "SOAP", Sender, "1.6.0", HTTP_RULES),
    adapter("successfactors_receiver", "sap:SuccessFactors", "HTTPS", "OData V2", Receiver, "1.9.0", HTTP_RULES),
    adapter("ariba_sender", "sap:Ariba", "HTTPS", "Ariba cXML", Sender, "1.4.0", HTTP_RULES),
    adapter("ariba_receiver", "sap:Ariba", "HTTPS", "Ariba cXML", Receiver, "1.4.0", HTTP_RULES),
    adapter("ldap_receiver", "sap:LDAP", "LDAP", "None", Receiver, "1.2.0", HTTP_RULES),
    adapter("jdbc_receiver", "sap:JDBC", "JDBC", "None", Receiver, "1.7.0", NO_RULES),
    adapter("elster_receiver", "sap:ELSTER", "HTTPS", "None", Receiver, "1.0.0", HTTP_RULES),
    adapter("facebook_receiver", "sap:Facebook", "HTTPS", "None", Receiver, "1.0.0", HTTP_RULES),
    adapter("twitter_receiver", "sap:Twitter", "HTTPS", "None", Receiver, "1.0.0", HTTP_RULES),
    adapter("odc_receiver", "sap:ODC", "HTTP", "OData V2", Receiver, "1.4.0", HTTP_RULES),
    adapter("open_connectors_receiver", "sap:OpenConnectors", "HTTPS", "None", Receiver, "1.2.0", HTTP_RULES),
    adapter("salesforce_sender", "sap:Salesforce", "HTTPS", "None", Sender, "1.1.0", HTTP_RULES),
    adapter("salesforce_receiver", "sap:Salesforce", "HTTPS", "None", Receiver, "1.1.0", HTTP_RULES),
    adapter("servicenow_receiver", "sap:ServiceNow", "HTTPS", "None", Receiver, "1.1.0", HTTP_RULES),
    adapter("workday_receiver", "sap:Workday", "HTTPS", "SOAP", Receiver, "1.0.0", HTTP_RULES),
    adapter("splunk_receiver", "sap:Splunk", "HTTPS", "None", Receiver, "1.0.0", HTTP_RULES),
    adapter("slack_receiver", "sap:Slack", "HTTPS", "None", Receiver, "1.0.0", HTTP_RULES),
    adapter("azure_storage_receiver", "sap:AzureStorage", "HTTPS", "None", Receiver, "1.0.0", HTTP_RULES),
    adapter("aws_s3_receiver", "sap:AmazonWebServices", "HTTPS", "S3", Receiver, "1.2.0", HTTP_RULES),
    adapter("aws_sqs_sender", "sap:AmazonWebServices", "HTTPS", "SQS", Sender, "1.2.0", HTTP_RULES),
    adapter("dropbox_receiver", "sap:Dropbox", "HTTPS", "None", Receiver, "1.0.0", HTTP_RULES),
    adapter("mongodb_receiver", "sap:MongoDB", "TCP", "None", Receiver, "1.0.0", MESSAGING_RULES),
];
