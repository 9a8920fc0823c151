//! Built-in reference libraries.
//!
//! Declarations standing in for referenced assemblies. They are parsed and
//! bound with the same front-end as user code; member bodies are omitted.

/// Which reference libraries a compilation sees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MetadataReferences {
    /// Base class library and the GraphQL library.
    #[default]
    All,
    /// Base class library only: nothing GraphQL-specific resolves.
    SystemOnly,
}

impl MetadataReferences {
    pub(crate) fn libraries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            MetadataReferences::All => &[
                ("System.Runtime.dll", SYSTEM_RUNTIME),
                ("GraphQL.dll", GRAPHQL),
            ],
            MetadataReferences::SystemOnly => &[("System.Runtime.dll", SYSTEM_RUNTIME)],
        }
    }
}

const SYSTEM_RUNTIME: &str = r#"
namespace System
{
    public class Object { }
    public abstract class ValueType { }
    public abstract class Enum : ValueType { }
    public abstract class Array { }
    public abstract class Type { }
    public abstract class Attribute { }
    public abstract class Delegate { }
    public struct Void { }
    public struct Boolean { }
    public struct Char { }
    public struct SByte { }
    public struct Byte { }
    public struct Int16 { }
    public struct UInt16 { }
    public struct Int32 { }
    public struct UInt32 { }
    public struct Int64 { }
    public struct UInt64 { }
    public struct IntPtr { }
    public struct UIntPtr { }
    public struct Half { }
    public struct Single { }
    public struct Double { }
    public struct Decimal { }
    public sealed class String { }
    public struct DateTime { }
    public struct DateTimeOffset { }
    public struct DateOnly { }
    public struct TimeOnly { }
    public struct TimeSpan { }
    public struct Guid { }
    public class Uri { }
    public struct Nullable<T> where T : struct
    {
        public bool HasValue { get; }
        public T Value { get; }
    }
    public interface IDisposable { void Dispose(); }
    public interface IServiceProvider { object? GetService(Type serviceType); }
    public interface IObservable<out T> { IDisposable Subscribe(IObserver<T> observer); }
    public interface IObserver<in T> { void OnNext(T value); }

    [Flags]
    public enum AttributeTargets
    {
        Assembly = 1,
        Module = 2,
        Class = 4,
        Struct = 8,
        Enum = 16,
        Constructor = 32,
        Method = 64,
        Property = 128,
        Field = 256,
        Event = 512,
        Interface = 1024,
        Parameter = 2048,
        Delegate = 4096,
        ReturnValue = 8192,
        GenericParameter = 16384,
        All = 32767,
    }

    [AttributeUsage(AttributeTargets.Class, Inherited = true)]
    public sealed class AttributeUsageAttribute : Attribute
    {
        public AttributeUsageAttribute(AttributeTargets validOn) { }
        public bool AllowMultiple { get; set; }
        public bool Inherited { get; set; }
    }

    [AttributeUsage(AttributeTargets.Enum)]
    public class FlagsAttribute : Attribute { }
}

namespace System.Numerics
{
    public struct BigInteger { }
}

namespace System.Collections
{
    public interface IEnumerable { }
}

namespace System.Collections.Generic
{
    public interface IEnumerable<out T> : System.Collections.IEnumerable { }
    public interface IAsyncEnumerable<out T> { }
    public interface ICollection<T> : IEnumerable<T> { int Count { get; } }
    public interface IList<T> : ICollection<T> { }
    public interface IReadOnlyCollection<out T> : IEnumerable<T> { int Count { get; } }
    public interface IReadOnlyList<out T> : IReadOnlyCollection<T> { }
    public interface ISet<T> : ICollection<T> { }
    public interface IReadOnlySet<T> : IReadOnlyCollection<T> { }
    public interface IDictionary<TKey, TValue> : ICollection<KeyValuePair<TKey, TValue>> { }
    public interface IReadOnlyDictionary<TKey, TValue> : IReadOnlyCollection<KeyValuePair<TKey, TValue>> { }
    public struct KeyValuePair<TKey, TValue>
    {
        public TKey Key { get; }
        public TValue Value { get; }
    }
    public class List<T> : IList<T>, IReadOnlyList<T> { public List() { } }
    public class HashSet<T> : ISet<T>, IReadOnlySet<T> { public HashSet() { } }
    public class Dictionary<TKey, TValue> : IDictionary<TKey, TValue>, IReadOnlyDictionary<TKey, TValue> { }
    public class Queue<T> : IEnumerable<T>, IReadOnlyCollection<T> { }
    public class Stack<T> : IEnumerable<T>, IReadOnlyCollection<T> { }
    public class LinkedList<T> : ICollection<T>, IReadOnlyCollection<T> { }
}

namespace System.Threading
{
    public struct CancellationToken { }
}

namespace System.Threading.Tasks
{
    public class Task { }
    public class Task<TResult> : Task { }
    public struct ValueTask { }
    public struct ValueTask<TResult> { }
}
"#;

const GRAPHQL: &str = r#"
using System;
using System.Collections.Generic;
using GraphQL.Types;

namespace GraphQL
{
    [AttributeUsage(AttributeTargets.Class, AllowMultiple = false)]
    public sealed class AotQueryTypeAttribute<TQueryType> : Attribute { }

    [AttributeUsage(AttributeTargets.Class, AllowMultiple = false)]
    public sealed class AotMutationTypeAttribute<TMutationType> : Attribute { }

    [AttributeUsage(AttributeTargets.Class, AllowMultiple = false)]
    public sealed class AotSubscriptionTypeAttribute<TSubscriptionType> : Attribute { }

    public enum OutputTypeKind
    {
        Auto,
        Object,
        Interface,
    }

    [AttributeUsage(AttributeTargets.Class, AllowMultiple = true)]
    public sealed class AotOutputTypeAttribute<T> : Attribute
    {
        public OutputTypeKind Kind { get; set; }
    }

    [AttributeUsage(AttributeTargets.Class, AllowMultiple = true)]
    public sealed class AotInputTypeAttribute<T> : Attribute { }

    [AttributeUsage(AttributeTargets.Class, AllowMultiple = true)]
    public sealed class AotGraphTypeAttribute<TGraphType> : Attribute
        where TGraphType : IGraphType
    {
        public bool AutoRegisterClrMapping { get; set; } = true;
    }

    [AttributeUsage(AttributeTargets.Class, AllowMultiple = true)]
    public sealed class AotTypeMappingAttribute<TClrType, TGraphType> : Attribute
        where TGraphType : IGraphType { }

    [AttributeUsage(AttributeTargets.Class, AllowMultiple = true)]
    public sealed class AotListTypeAttribute<TListType> : Attribute { }

    [AttributeUsage(AttributeTargets.Class, AllowMultiple = true)]
    public sealed class AotRemapTypeAttribute<TGraphType, TGraphTypeImplementation> : Attribute
        where TGraphType : IGraphType
        where TGraphTypeImplementation : TGraphType { }

    [Flags]
    public enum ScanMemberTypes
    {
        Properties = 1,
        Fields = 2,
        Methods = 4,
    }

    [AttributeUsage(AttributeTargets.Class | AttributeTargets.Struct | AttributeTargets.Interface)]
    public sealed class MemberScanAttribute : Attribute
    {
        public MemberScanAttribute(ScanMemberTypes memberTypes) { }
        public ScanMemberTypes MemberTypes { get; set; }
    }

    [AttributeUsage(AttributeTargets.Property | AttributeTargets.Field | AttributeTargets.Method | AttributeTargets.Parameter)]
    public sealed class IgnoreAttribute : Attribute { }

    public abstract class GraphQLAttribute : Attribute { }

    public class InputTypeAttribute : GraphQLAttribute
    {
        public InputTypeAttribute() { }
        public InputTypeAttribute(Type graphType) { }
        public Type? GraphType { get; set; }
    }

    public class InputTypeAttribute<TGraphType> : InputTypeAttribute
        where TGraphType : IGraphType
    {
        public InputTypeAttribute() : base(typeof(TGraphType)) { }
    }

    public class OutputTypeAttribute : GraphQLAttribute
    {
        public OutputTypeAttribute() { }
        public OutputTypeAttribute(Type graphType) { }
        public Type? GraphType { get; set; }
    }

    public class OutputTypeAttribute<TGraphType> : OutputTypeAttribute
        where TGraphType : IGraphType
    {
        public OutputTypeAttribute() : base(typeof(TGraphType)) { }
    }

    public class BaseGraphTypeAttribute : GraphQLAttribute
    {
        public BaseGraphTypeAttribute() { }
        public BaseGraphTypeAttribute(Type graphType) { }
        public Type? GraphType { get; set; }
    }

    public class BaseGraphTypeAttribute<TGraphType> : BaseGraphTypeAttribute
        where TGraphType : IGraphType
    {
        public BaseGraphTypeAttribute() : base(typeof(TGraphType)) { }
    }

    public class InputBaseTypeAttribute : GraphQLAttribute
    {
        public InputBaseTypeAttribute() { }
        public InputBaseTypeAttribute(Type graphType) { }
        public Type? GraphType { get; set; }
    }

    public class InputBaseTypeAttribute<TGraphType> : InputBaseTypeAttribute
        where TGraphType : IGraphType
    {
        public InputBaseTypeAttribute() : base(typeof(TGraphType)) { }
    }

    public class OutputBaseTypeAttribute : GraphQLAttribute
    {
        public OutputBaseTypeAttribute() { }
        public OutputBaseTypeAttribute(Type graphType) { }
        public Type? GraphType { get; set; }
    }

    public class OutputBaseTypeAttribute<TGraphType> : OutputBaseTypeAttribute
        where TGraphType : IGraphType
    {
        public OutputBaseTypeAttribute() : base(typeof(TGraphType)) { }
    }

    public sealed class IdAttribute : GraphQLAttribute { }

    [AttributeUsage(AttributeTargets.Class)]
    public sealed class DoNotMapClrTypeAttribute : Attribute { }

    [AttributeUsage(AttributeTargets.Class)]
    public sealed class ClrTypeMappingAttribute : Attribute
    {
        public ClrTypeMappingAttribute(Type clrType) { }
        public Type ClrType { get; }
    }

    [AttributeUsage(AttributeTargets.Constructor)]
    public sealed class GraphQLConstructorAttribute : Attribute { }

    [AttributeUsage(AttributeTargets.Parameter)]
    public sealed class FromServicesAttribute : GraphQLAttribute { }

    [AttributeUsage(AttributeTargets.Parameter)]
    public sealed class FromSourceAttribute : GraphQLAttribute { }

    [AttributeUsage(AttributeTargets.Parameter)]
    public sealed class FromUserContextAttribute : GraphQLAttribute { }

    public interface IResolveFieldContext
    {
        object? Source { get; }
        System.Threading.CancellationToken CancellationToken { get; }
        IServiceProvider? RequestServices { get; }
    }

    public interface IResolveFieldContext<out TSource> : IResolveFieldContext
    {
        new TSource Source { get; }
    }

    public static class ObservableExtensions
    {
        public static IObservable<T> ToObservable<T>(this IAsyncEnumerable<T> enumerable);
    }
}

namespace GraphQL.DataLoader
{
    public interface IDataLoaderResult { }
    public interface IDataLoaderResult<T> : IDataLoaderResult { }
}

namespace GraphQL.DI
{
    public interface IConfigureSchema { }
}

namespace GraphQL.Types
{
    public interface IProvideMetadata { }
    public interface INamedType { string Name { get; set; } }
    public interface IGraphType : IProvideMetadata, INamedType { }
    public interface IComplexGraphType : IGraphType { }
    public interface IImplementInterfaces : IComplexGraphType { }
    public interface IObjectGraphType : IImplementInterfaces { }
    public interface IInterfaceGraphType : IComplexGraphType { }
    public interface IInputObjectGraphType : IComplexGraphType { }

    public abstract class GraphType : IGraphType
    {
        public string Name { get; set; }
    }

    public abstract class ComplexGraphType<TSourceType> : GraphType, IComplexGraphType { }

    public class ObjectGraphType<TSourceType> : ComplexGraphType<TSourceType>, IObjectGraphType { }
    public class ObjectGraphType : ObjectGraphType<object?> { }

    public class InputObjectGraphType<TSourceType> : ComplexGraphType<TSourceType>, IInputObjectGraphType
    {
        public virtual object ParseDictionary(IDictionary<string, object?> value);
    }
    public class InputObjectGraphType : InputObjectGraphType<object> { }

    public class InterfaceGraphType<TSource> : ComplexGraphType<TSource>, IInterfaceGraphType { }
    public class InterfaceGraphType : InterfaceGraphType<object> { }

    public class AutoRegisteringObjectGraphType<TSourceType> : ObjectGraphType<TSourceType> { }
    public class AutoRegisteringInputObjectGraphType<TSourceType> : InputObjectGraphType<TSourceType> { }
    public class AutoRegisteringInterfaceGraphType<TSourceType> : InterfaceGraphType<TSourceType> { }

    public sealed class NonNullGraphType<T> : GraphType where T : IGraphType { }
    public sealed class ListGraphType<T> : GraphType where T : IGraphType { }

    public sealed class GraphQLClrInputTypeReference<T> : InputObjectGraphType { }
    public sealed class GraphQLClrOutputTypeReference<T> : InterfaceGraphType { }

    public abstract class ScalarGraphType : GraphType { }
    public class EnumerationGraphType : ScalarGraphType { }
    public class EnumerationGraphType<TEnum> : EnumerationGraphType where TEnum : Enum { }

    public class StringGraphType : ScalarGraphType { }
    public class IntGraphType : ScalarGraphType { }
    public class LongGraphType : ScalarGraphType { }
    public class BigIntGraphType : ScalarGraphType { }
    public class FloatGraphType : ScalarGraphType { }
    public class HalfGraphType : ScalarGraphType { }
    public class DecimalGraphType : ScalarGraphType { }
    public class BooleanGraphType : ScalarGraphType { }
    public class DateTimeGraphType : ScalarGraphType { }
    public class DateTimeOffsetGraphType : ScalarGraphType { }
    public class DateOnlyGraphType : ScalarGraphType { }
    public class TimeOnlyGraphType : ScalarGraphType { }
    public class TimeSpanSecondsGraphType : ScalarGraphType { }
    public class IdGraphType : ScalarGraphType { }
    public class ShortGraphType : ScalarGraphType { }
    public class UShortGraphType : ScalarGraphType { }
    public class UIntGraphType : ScalarGraphType { }
    public class ULongGraphType : ScalarGraphType { }
    public class ByteGraphType : ScalarGraphType { }
    public class SByteGraphType : ScalarGraphType { }
    public class UriGraphType : ScalarGraphType { }

    public interface ISchema { }

    public class Schema : ISchema
    {
        public Schema(IServiceProvider services, IEnumerable<GraphQL.DI.IConfigureSchema> configurations) { }
        public IObjectGraphType Query { get; set; }
        public IObjectGraphType? Mutation { get; set; }
        public IObjectGraphType? Subscription { get; set; }
    }

    public abstract class AotSchema : Schema
    {
        protected AotSchema(IServiceProvider services, IEnumerable<GraphQL.DI.IConfigureSchema> configurations) : base(services, configurations) { }
        protected void AddAotType<TGraphType>() where TGraphType : IGraphType;
        protected void AddAotType<TGraphType, TAotGraphType>() where TAotGraphType : TGraphType;
        protected T GetAotType<T>() where T : IGraphType;
        protected void AddOutputTypeMapping<TClrType, TGraphType>() where TGraphType : IGraphType;
        protected void AddInputTypeMapping<TClrType, TGraphType>() where TGraphType : IGraphType;
        protected void RegisterArrayConverter<TElementType>();
        protected void RegisterListConverter<TElementType>();
        protected void RegisterHashSetConverter<TElementType>();
    }
}
"#;
